use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user, stored in the `user` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub logged_in_at: DateTime<Utc>,
}

/// The single account the mocked sign-in accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DemoAccount {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            display_name: "Demo Manager".to_string(),
            role: "manager".to_string(),
        }
    }
}
