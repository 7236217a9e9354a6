use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::ValidationError;

/// Slot holding the application settings object.
pub const SETTINGS_KEY: &str = "settings";
/// Slot holding the signed-in user session.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Inventory,
    Customers,
    Leads,
    Deals,
    Sales,
    Tasks,
    Reports,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Inventory,
        EntityKind::Customers,
        EntityKind::Leads,
        EntityKind::Deals,
        EntityKind::Sales,
        EntityKind::Tasks,
        EntityKind::Reports,
    ];

    pub fn slot_key(self) -> &'static str {
        match self {
            EntityKind::Inventory => "inventory",
            EntityKind::Customers => "customers",
            EntityKind::Leads => "leads",
            EntityKind::Deals => "deals",
            EntityKind::Sales => "sales",
            EntityKind::Tasks => "tasks",
            EntityKind::Reports => "reports",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Inventory => "Inventory",
            EntityKind::Customers => "Customers",
            EntityKind::Leads => "Leads",
            EntityKind::Deals => "Deals",
            EntityKind::Sales => "Sales",
            EntityKind::Tasks => "Tasks",
            EntityKind::Reports => "Reports",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_key())
    }
}

impl FromStr for EntityKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slot_key().eq_ignore_ascii_case(value) || kind.label().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| ValidationError::new("kind", format!("unknown entity kind '{value}'")))
    }
}
