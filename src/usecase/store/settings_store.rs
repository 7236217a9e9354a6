use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::entities::kind::SETTINGS_KEY;
use crate::domain::entities::settings::{Settings, Theme};
use crate::error::Result;
use crate::usecase::ports::storage::SlotStorage;
use crate::usecase::store::record_store::{merge_patch, read_json, system_clock, write_json, Clock};

/// The single settings object.
pub struct SettingsStore {
    storage: Arc<dyn SlotStorage>,
    clock: Clock,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self {
            storage,
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Stored settings, or defaults when none have been saved.
    pub fn load(&self) -> Result<Settings> {
        Ok(read_json(self.storage.as_ref(), SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        write_json(self.storage.as_ref(), SETTINGS_KEY, settings)?;
        debug!("saved settings");
        Ok(())
    }

    pub fn update(&self, patch: Map<String, Value>) -> Result<Settings> {
        let current = self.load()?;
        let mut updated: Settings = merge_patch(&current, patch)?;
        updated.updated_at = Some((self.clock)());
        self.save(&updated)?;
        Ok(updated)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Settings> {
        let mut settings = self.load()?;
        settings.theme = theme;
        settings.updated_at = Some((self.clock)());
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let current = self.load()?.theme;
        Ok(self.set_theme(current.toggle())?.theme)
    }

    pub fn reset(&self) -> Result<Settings> {
        self.storage.remove(SETTINGS_KEY)?;
        info!("settings reset to defaults");
        Ok(Settings::default())
    }
}
