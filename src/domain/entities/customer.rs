use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_email, require_text, Entity, ValidationError};
use super::tabular::{format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customers;

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
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_email("email", &self.email)
    }
}

impl Tabular for Customer {
    const HEADERS: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "email",
        "phone",
        "street",
        "city",
        "state",
        "zip",
        "notes",
        "dateCreated",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.street.clone(),
            self.address.city.clone(),
            self.address.state.clone(),
            self.address.zip.clone(),
            self.notes.clone(),
            format_timestamp(self.date_created),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            first_name: row.text("firstName"),
            last_name: row.text("lastName"),
            email: row.text("email"),
            phone: row.text("phone"),
            address: Address {
                street: row.text("street"),
                city: row.text("city"),
                state: row.text("state"),
                zip: row.text("zip"),
            },
            notes: row.text("notes"),
            date_created: row.timestamp("dateCreated")?,
            updated_at: None,
        })
    }
}
