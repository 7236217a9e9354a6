use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::customer::Customer;
use super::deal::Deal;
use super::kind::EntityKind;
use super::lead::Lead;
use super::report::Report;
use super::sale::Sale;
use super::tabular::Tabular;
use super::task::Task;
use super::vehicle::Vehicle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A record kept in one entity collection.
///
/// The store owns `id`, the creation stamp and `updatedAt`; everything else is
/// domain data checked by [`Entity::validate`] before each write.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub(crate) fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if !value.is_empty() && !value.contains('@') {
        return Err(ValidationError::new(
            field,
            format!("'{value}' is not an email address"),
        ));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be zero or greater"));
    }
    Ok(())
}

/// Any collection record, discriminated by its entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CrmRecord {
    Inventory(Vehicle),
    Customers(Customer),
    Leads(Lead),
    Deals(Deal),
    Sales(Sale),
    Tasks(Task),
    Reports(Report),
}

impl CrmRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            CrmRecord::Inventory(_) => EntityKind::Inventory,
            CrmRecord::Customers(_) => EntityKind::Customers,
            CrmRecord::Leads(_) => EntityKind::Leads,
            CrmRecord::Deals(_) => EntityKind::Deals,
            CrmRecord::Sales(_) => EntityKind::Sales,
            CrmRecord::Tasks(_) => EntityKind::Tasks,
            CrmRecord::Reports(_) => EntityKind::Reports,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CrmRecord::Inventory(record) => record.id(),
            CrmRecord::Customers(record) => record.id(),
            CrmRecord::Leads(record) => record.id(),
            CrmRecord::Deals(record) => record.id(),
            CrmRecord::Sales(record) => record.id(),
            CrmRecord::Tasks(record) => record.id(),
            CrmRecord::Reports(record) => record.id(),
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        headers_for(self.kind())
    }

    pub fn cells(&self) -> Vec<String> {
        match self {
            CrmRecord::Inventory(record) => record.to_row(),
            CrmRecord::Customers(record) => record.to_row(),
            CrmRecord::Leads(record) => record.to_row(),
            CrmRecord::Deals(record) => record.to_row(),
            CrmRecord::Sales(record) => record.to_row(),
            CrmRecord::Tasks(record) => record.to_row(),
            CrmRecord::Reports(record) => record.to_row(),
        }
    }
}

pub fn headers_for(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Inventory => Vehicle::HEADERS,
        EntityKind::Customers => Customer::HEADERS,
        EntityKind::Leads => Lead::HEADERS,
        EntityKind::Deals => Deal::HEADERS,
        EntityKind::Sales => Sale::HEADERS,
        EntityKind::Tasks => Task::HEADERS,
        EntityKind::Reports => Report::HEADERS,
    }
}

macro_rules! impl_from_record {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CrmRecord {
                fn from(record: $ty) -> Self {
                    CrmRecord::$variant(record)
                }
            }
        )*
    };
}

impl_from_record! {
    Inventory => Vehicle,
    Customers => Customer,
    Leads => Lead,
    Deals => Deal,
    Sales => Sale,
    Tasks => Task,
    Reports => Report,
}
