use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::query::date_range::DateRange;

use super::record::{require_text, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub follow_up_reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            follow_up_reminders: true,
        }
    }
}

/// Application preferences, persisted as one object. Fields missing from the
/// stored blob fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub dealership_name: String,
    pub theme: Theme,
    pub currency: String,
    pub default_date_range: DateRange,
    pub items_per_page: u32,
    pub check_duplicate_leads: bool,
    pub notifications: NotificationSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dealership_name: "AutoCRM Motors".to_string(),
            theme: Theme::Light,
            currency: "USD".to_string(),
            default_date_range: DateRange::AllTime,
            items_per_page: 25,
            check_duplicate_leads: true,
            notifications: NotificationSettings::default(),
            updated_at: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("dealershipName", &self.dealership_name)?;
        if self.currency.trim().len() != 3 {
            return Err(ValidationError::new(
                "currency",
                format!("'{}' is not a three-letter currency code", self.currency),
            ));
        }
        if !(1..=500).contains(&self.items_per_page) {
            return Err(ValidationError::new("itemsPerPage", "must be between 1 and 500"));
        }
        Ok(())
    }
}
