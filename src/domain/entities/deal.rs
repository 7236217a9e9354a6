use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_non_negative, require_text, Entity, ValidationError};
use super::tabular::{format_date, format_optional, format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DealStatus {
    #[default]
    Pending,
    Negotiating,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStatus {
    pub const ALL: [DealStatus; 4] = [
        DealStatus::Pending,
        DealStatus::Negotiating,
        DealStatus::ClosedWon,
        DealStatus::ClosedLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DealStatus::Pending => "Pending",
            DealStatus::Negotiating => "Negotiating",
            DealStatus::ClosedWon => "Closed Won",
            DealStatus::ClosedLost => "Closed Lost",
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::new("status", format!("unknown deal status '{value}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinanceDetails {
    pub down_payment: f64,
    pub term_months: u32,
    pub apr: f64,
    pub lender: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub customer: String,
    pub vehicle: String,
    pub value: f64,
    pub status: DealStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_details: Option<FinanceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Deal {
    pub fn new(customer: impl Into<String>, vehicle: impl Into<String>, value: f64, status: DealStatus) -> Self {
        Self {
            customer: customer.into(),
            vehicle: vehicle.into(),
            value,
            status,
            ..Self::default()
        }
    }

    pub fn is_won(&self) -> bool {
        self.status == DealStatus::ClosedWon
    }
}

impl Entity for Deal {
    const KIND: EntityKind = EntityKind::Deals;

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
        require_non_negative("value", self.value)?;
        if let Some(finance) = &self.finance_details {
            require_non_negative("downPayment", finance.down_payment)?;
            require_non_negative("apr", finance.apr)?;
        }
        Ok(())
    }
}

impl Tabular for Deal {
    const HEADERS: &'static [&'static str] = &[
        "customer",
        "vehicle",
        "value",
        "status",
        "downPayment",
        "termMonths",
        "apr",
        "lender",
        "closeDate",
        "notes",
        "dateCreated",
    ];

    fn to_row(&self) -> Vec<String> {
        let finance = self.finance_details.as_ref();
        vec![
            self.customer.clone(),
            self.vehicle.clone(),
            self.value.to_string(),
            self.status.to_string(),
            format_optional(finance.map(|f| f.down_payment)),
            format_optional(finance.map(|f| f.term_months)),
            format_optional(finance.map(|f| f.apr)),
            finance.map(|f| f.lender.clone()).unwrap_or_default(),
            format_date(self.close_date),
            self.notes.clone(),
            format_timestamp(self.date_created),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        let down_payment = row.amount("downPayment")?;
        let term_months = row.parse("termMonths")?;
        let apr = row.parse("apr")?;
        let lender = row.text("lender");
        let finance_details = if down_payment.is_none()
            && term_months.is_none()
            && apr.is_none()
            && lender.is_empty()
        {
            None
        } else {
            Some(FinanceDetails {
                down_payment: down_payment.unwrap_or_default(),
                term_months: term_months.unwrap_or_default(),
                apr: apr.unwrap_or_default(),
                lender,
            })
        };

        Ok(Self {
            id: String::new(),
            customer: row.text("customer"),
            vehicle: row.text("vehicle"),
            value: row.amount("value")?.unwrap_or_default(),
            status: row.parse("status")?.unwrap_or_default(),
            finance_details,
            close_date: row.date("closeDate")?,
            notes: row.text("notes"),
            date_created: row.timestamp("dateCreated")?,
            updated_at: None,
        })
    }
}
