//! Access-control application service.
//!
//! Owns the single mutable cell holding the signed-in identity and answers
//! module and capability questions for the shell. Persistence is best
//! effort: when the session store fails, the identity lives in memory for
//! the rest of the process.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use peopledesk_core::DEFAULT_SESSION_KEY;
use peopledesk_domain::Identity;

use crate::{CredentialStore, SessionPersistence};

mod codec;
mod gating;
mod lifecycle;


pub use codec::{SESSION_FORMAT_VERSION, decode_session, encode_session};

/// Coarse session state exposed to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is signed in.
    NoSession,
    /// An identity is signed in.
    Authenticated,
}

/// Application service for sign-in, session restore and feature gating.
#[derive(Clone)]
pub struct AccessControlService {
    credential_store: Arc<dyn CredentialStore>,
    session_persistence: Arc<dyn SessionPersistence>,
    session_key: String,
    current: Arc<RwLock<Option<Identity>>>,
    mutation_gate: Arc<Mutex<()>>,
}

impl AccessControlService {
    /// Creates a service with no signed-in identity.
    #[must_use]
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        session_persistence: Arc<dyn SessionPersistence>,
    ) -> Self {
        Self {
            credential_store,
            session_persistence,
            session_key: DEFAULT_SESSION_KEY.to_owned(),
            current: Arc::new(RwLock::new(None)),
            mutation_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the service with a different persistence key.
    #[must_use]
    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = session_key.into();
        self
    }

    /// Returns the persistence key used for the session.
    #[must_use]
    pub fn session_key(&self) -> &str {
        self.session_key.as_str()
    }

    // A poisoned cell still holds a whole identity (writes replace the value
    // in one assignment), so the inner value is used as is.
    fn with_current<T>(&self, read: impl FnOnce(Option<&Identity>) -> T) -> T {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        read(guard.as_ref())
    }

    fn replace_current(&self, identity: Option<Identity>) -> Option<Identity> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, identity)
    }
}
