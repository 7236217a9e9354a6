use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_non_negative, require_text, Entity, ValidationError};
use super::tabular::{format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::Pending,
        VehicleStatus::Sold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Pending => "Pending",
            VehicleStatus::Sold => "Sold",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::new("status", format!("unknown vehicle status '{value}'")))
    }
}

/// One unit of dealership inventory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub vin: String,
    pub color: String,
    pub mileage: u32,
    pub price: f64,
    pub status: VehicleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn new(year: i32, make: impl Into<String>, model: impl Into<String>, price: f64) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            price,
            ..Self::default()
        }
    }

    pub fn title(&self) -> String {
        let mut title = format!("{} {} {}", self.year, self.make, self.model);
        if !self.trim.is_empty() {
            title.push(' ');
            title.push_str(&self.trim);
        }
        title
    }
}

impl Entity for Vehicle {
    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.date_added
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.date_added = Some(at);
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        if !(1900..=2100).contains(&self.year) {
            return Err(ValidationError::new(
                "year",
                format!("{} is outside 1900..=2100", self.year),
            ));
        }
        require_non_negative("price", self.price)
    }
}

impl Tabular for Vehicle {
    const HEADERS: &'static [&'static str] = &[
        "year",
        "make",
        "model",
        "trim",
        "vin",
        "color",
        "mileage",
        "price",
        "status",
        "dateAdded",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.make.clone(),
            self.model.clone(),
            self.trim.clone(),
            self.vin.clone(),
            self.color.clone(),
            self.mileage.to_string(),
            self.price.to_string(),
            self.status.to_string(),
            format_timestamp(self.date_added),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            year: row.parse("year")?.unwrap_or_default(),
            make: row.text("make"),
            model: row.text("model"),
            trim: row.text("trim"),
            vin: row.text("vin"),
            color: row.text("color"),
            mileage: row.parse("mileage")?.unwrap_or_default(),
            price: row.amount("price")?.unwrap_or_default(),
            status: row.parse("status")?.unwrap_or_default(),
            date_added: row.timestamp("dateAdded")?,
            updated_at: None,
        })
    }
}
