use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::kind::SESSION_KEY;
use crate::domain::entities::session::{DemoAccount, Session};
use crate::error::{CrmError, Result};
use crate::usecase::ports::storage::SlotStorage;
use crate::usecase::store::record_store::{read_json, system_clock, write_json, Clock};

/// Mocked sign-in gate. Accepts only the configured demo account and keeps
/// the session in the `user` slot.
pub struct AuthGate {
    storage: Arc<dyn SlotStorage>,
    account: DemoAccount,
    clock: Clock,
}

impl AuthGate {
    pub fn new(storage: Arc<dyn SlotStorage>, account: DemoAccount) -> Self {
        Self {
            storage,
            account,
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if !username.eq_ignore_ascii_case(&self.account.username) || password != self.account.password {
            warn!(username, "rejected sign-in");
            return Err(CrmError::InvalidCredentials);
        }

        let session = Session {
            username: self.account.username.clone(),
            display_name: self.account.display_name.clone(),
            role: self.account.role.clone(),
            logged_in_at: (self.clock)(),
        };
        write_json(self.storage.as_ref(), SESSION_KEY, &session)?;
        info!(username = %session.username, "signed in");
        Ok(session)
    }

    /// Returns whether a session was open.
    pub fn logout(&self) -> Result<bool> {
        let removed = self.storage.remove(SESSION_KEY)?;
        if removed {
            info!("signed out");
        }
        Ok(removed)
    }

    pub fn current(&self) -> Result<Option<Session>> {
        read_json(self.storage.as_ref(), SESSION_KEY)
    }

    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.current()?.is_some())
    }
}
