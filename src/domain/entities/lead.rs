use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_email, require_non_negative, require_text, Entity, ValidationError};
use super::tabular::{format_date, format_optional, format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Negotiating,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Negotiating,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Negotiating => "Negotiating",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::new("status", format!("unknown lead status '{value}'")))
    }
}

/// The vehicle a lead asked about. Owned by the lead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleInterest {
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    pub interest: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,
    pub assigned_to: String,
    pub vehicle_interest: VehicleInterest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for Lead {
    const KIND: EntityKind = EntityKind::Leads;

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
        require_email("email", &self.email)?;
        if let Some(budget) = self.vehicle_interest.budget {
            require_non_negative("vehicleBudget", budget)?;
        }
        Ok(())
    }
}

impl Tabular for Lead {
    const HEADERS: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "email",
        "phone",
        "source",
        "status",
        "interest",
        "notes",
        "dateCreated",
        "lastContact",
        "nextFollowUp",
        "assignedTo",
        "vehicleMake",
        "vehicleModel",
        "vehicleYear",
        "vehicleBudget",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.source.clone(),
            self.status.to_string(),
            self.interest.clone(),
            self.notes.clone(),
            format_timestamp(self.date_created),
            format_date(self.last_contact),
            format_date(self.next_follow_up),
            self.assigned_to.clone(),
            self.vehicle_interest.make.clone(),
            self.vehicle_interest.model.clone(),
            format_optional(self.vehicle_interest.year),
            format_optional(self.vehicle_interest.budget),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            first_name: row.text("firstName"),
            last_name: row.text("lastName"),
            email: row.text("email"),
            phone: row.text("phone"),
            source: row.text("source"),
            status: row.parse("status")?.unwrap_or_default(),
            interest: row.text("interest"),
            notes: row.text("notes"),
            date_created: row.timestamp("dateCreated")?,
            last_contact: row.date("lastContact")?,
            next_follow_up: row.date("nextFollowUp")?,
            assigned_to: row.text("assignedTo"),
            vehicle_interest: VehicleInterest {
                make: row.text("vehicleMake"),
                model: row.text("vehicleModel"),
                year: row.parse("vehicleYear")?,
                budget: row.amount("vehicleBudget")?,
            },
            updated_at: None,
        })
    }

    fn duplicate_key(&self) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() {
            None
        } else {
            Some(email.to_lowercase())
        }
    }
}
