use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::query::date_range::DateRange;

use super::kind::EntityKind;
use super::record::{require_text, Entity, ValidationError};
use super::tabular::{format_timestamp, RowView, Tabular};

/// A saved report: the stats of one entity kind over one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: EntityKind::Deals,
            range: DateRange::default(),
            last_run: None,
            date_created: None,
            updated_at: None,
        }
    }
}

impl Report {
    pub fn new(name: impl Into<String>, kind: EntityKind, range: DateRange) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            ..Self::default()
        }
    }
}

impl Entity for Report {
    const KIND: EntityKind = EntityKind::Reports;

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
        require_text("name", &self.name)
    }
}

impl Tabular for Report {
    const HEADERS: &'static [&'static str] = &["name", "kind", "range", "lastRun", "dateCreated"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.to_string(),
            self.range.to_string(),
            format_timestamp(self.last_run),
            format_timestamp(self.date_created),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            name: row.text("name"),
            kind: row.parse("kind")?.unwrap_or(EntityKind::Deals),
            range: row.parse("range")?.unwrap_or_default(),
            last_run: row.timestamp("lastRun")?,
            date_created: row.timestamp("dateCreated")?,
            updated_at: None,
        })
    }
}
