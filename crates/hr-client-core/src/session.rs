//! Owns the persisted credential of the logged in user
//!
//! The credential lives in three storage slots (token, subject and expiry).
//! They are always written and removed together while holding the lock, and a
//! read that finds any slot missing or unreadable treats the whole credential
//! as absent.

use anyhow::Context;
use hr_shared::{
    const_config::storage::{
        STORAGE_ALL_KEYS, STORAGE_KEY_EXPIRES_AT, STORAGE_KEY_SUBJECT, STORAGE_KEY_TOKEN,
    },
    log_err_as_warn,
    token::AuthToken,
    uac::{Capabilities, Subject},
};
use hr_time::Timestamp;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::storage::{MemoryStorage, SlotStorage};

#[derive(Debug, Clone)]
pub struct SessionManager {
    storage: Arc<Mutex<Box<dyn SlotStorage>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: AuthToken,
    pub subject: Subject,
    pub expires_at: Timestamp,
}

impl Credential {
    /// A token is usable strictly before its expiry
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SessionManager {
    pub fn new<S: SlotStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(Box::new(storage))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Replaces any stored credential. No validation is done on the values
    #[tracing::instrument(skip(token))]
    pub fn save_credential(
        &self,
        token: AuthToken,
        subject: &Subject,
        expires_at: Timestamp,
    ) -> anyhow::Result<()> {
        let subject = serde_json::to_string(subject).context("failed to serialize subject")?;
        let slots = [
            (STORAGE_KEY_TOKEN, token.expose().to_string()),
            (STORAGE_KEY_SUBJECT, subject),
            (STORAGE_KEY_EXPIRES_AT, expires_at.to_rfc3339()),
        ];
        self.lock()
            .set_all(&slots)
            .context("failed to persist credential")?;
        info!("credential saved");
        Ok(())
    }

    /// Returns the stored credential whether or not it has expired
    pub fn credential(&self) -> Option<Credential> {
        let storage = self.lock();
        let token = storage.get(STORAGE_KEY_TOKEN).filter(|t| !t.is_empty())?;
        let subject = storage.get(STORAGE_KEY_SUBJECT)?;
        let expires_at = storage.get(STORAGE_KEY_EXPIRES_AT)?;
        drop(storage);

        let subject = match serde_json::from_str::<Subject>(&subject) {
            Ok(subject) => subject,
            Err(e) => {
                debug!(?e, "stored subject is unreadable");
                return None;
            }
        };
        let expires_at = match Timestamp::parse(&expires_at) {
            Ok(expires_at) => expires_at,
            Err(e) => {
                debug!(?e, "stored expiry is unreadable");
                return None;
            }
        };
        Some(Credential {
            token: token.into(),
            subject,
            expires_at,
        })
    }

    /// The token to present to the backend, even if it has expired locally
    pub fn token(&self) -> Option<AuthToken> {
        self.credential().map(|c| c.token)
    }

    pub fn subject(&self) -> Option<Subject> {
        self.credential().map(|c| c.subject)
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.credential().map(|c| c.expires_at)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Timestamp::now())
    }

    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.credential().is_some_and(|c| c.is_valid_at(now))
    }

    /// Same as [`Self::is_valid`]
    pub fn is_authenticated(&self) -> bool {
        self.is_valid()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.subject().is_some_and(|s| s.has_role(role))
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.subject().is_some_and(|s| s.has_any_role(roles))
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_subject(self.subject().as_ref())
    }

    /// Removes all slots. Safe to call when nothing is stored
    #[tracing::instrument]
    pub fn clear(&self) {
        log_err_as_warn!(self.lock().remove_all(&STORAGE_ALL_KEYS));
        info!("credential cleared");
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn SlotStorage>> {
        self.storage.lock().expect("mutex poisoned")
    }
}
