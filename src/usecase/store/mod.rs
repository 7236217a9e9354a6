pub mod auth;
pub mod record_store;
pub mod registry;
pub mod settings_store;
