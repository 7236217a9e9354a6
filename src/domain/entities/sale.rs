use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_non_negative, require_text, Entity, ValidationError};
use super::tabular::{format_date, format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Finance,
    Lease,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Finance,
        PaymentMethod::Lease,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Finance => "Finance",
            PaymentMethod::Lease => "Lease",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ValidationError::new("paymentMethod", format!("unknown payment method '{value}'"))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub customer: String,
    pub vehicle: String,
    pub sale_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<NaiveDate>,
    pub salesperson: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Sale {
    pub fn new(customer: impl Into<String>, vehicle: impl Into<String>, sale_price: f64) -> Self {
        Self {
            customer: customer.into(),
            vehicle: vehicle.into(),
            sale_price,
            ..Self::default()
        }
    }
}

impl Entity for Sale {
    const KIND: EntityKind = EntityKind::Sales;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.date_created
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.date_created = Some(at);
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("customer", &self.customer)?;
        require_text("vehicle", &self.vehicle)?;
        require_non_negative("salePrice", self.sale_price)
    }
}

impl Tabular for Sale {
    const HEADERS: &'static [&'static str] = &[
        "customer",
        "vehicle",
        "salePrice",
        "saleDate",
        "salesperson",
        "paymentMethod",
        "dateCreated",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.customer.clone(),
            self.vehicle.clone(),
            self.sale_price.to_string(),
            format_date(self.sale_date),
            self.salesperson.clone(),
            self.payment_method.to_string(),
            format_timestamp(self.date_created),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            customer: row.text("customer"),
            vehicle: row.text("vehicle"),
            sale_price: row.amount("salePrice")?.unwrap_or_default(),
            sale_date: row.date("saleDate")?,
            salesperson: row.text("salesperson"),
            payment_method: row.parse("paymentMethod")?.unwrap_or_default(),
            date_created: row.timestamp("dateCreated")?,
            updated_at: None,
        })
    }
}
