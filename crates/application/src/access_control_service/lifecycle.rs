use chrono::Utc;
use tracing::{debug, info, warn};

use peopledesk_core::{AppError, AppResult, IdentityId};
use peopledesk_domain::{Identity, ProfilePatch};

use super::codec::{decode_session, encode_session};
use super::*;

impl AccessControlService {
    /// Restores the persisted session, if there is a readable one.
    ///
    /// Never fails: missing, unreadable or malformed sessions all yield
    /// `None` and leave the in-memory state untouched.
    pub async fn restore(&self) -> Option<Identity> {
        let _gate = self.mutation_gate.lock().await;

        let stored = match self.session_persistence.get(&self.session_key).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(
                    session_key = %self.session_key,
                    error = %error,
                    "failed to read persisted session"
                );
                return None;
            }
        };

        let Some(encoded) = stored.filter(|encoded| !encoded.is_empty()) else {
            debug!(session_key = %self.session_key, "no persisted session");
            return None;
        };

        match decode_session(&encoded) {
            Ok(identity) => {
                info!(
                    identity_id = %identity.id(),
                    role = %identity.role(),
                    "session restored"
                );
                self.replace_current(Some(identity.clone()));
                Some(identity)
            }
            Err(error) => {
                warn!(
                    session_key = %self.session_key,
                    error = %error,
                    "ignoring unreadable persisted session"
                );
                None
            }
        }
    }

    /// Signs in with an exact email/password pair.
    ///
    /// Any mismatch fails with [`AppError::InvalidCredentials`] and changes
    /// nothing. On success the new identity replaces any previous one.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Identity> {
        if email.is_empty() || password.is_empty() {
            info!(outcome = "invalid_credentials", "sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }

        let Some(record) = self.credential_store.lookup(email, password).await? else {
            info!(outcome = "invalid_credentials", "sign-in rejected");
            return Err(AppError::InvalidCredentials);
        };

        let identity = record.into_identity(IdentityId::new(), Utc::now());

        let _gate = self.mutation_gate.lock().await;
        self.persist(&identity).await;
        let previous = self.replace_current(Some(identity.clone()));

        info!(
            identity_id = %identity.id(),
            role = %identity.role(),
            replaced_session = previous.is_some(),
            outcome = "success",
            "sign-in succeeded"
        );

        Ok(identity)
    }

    /// Signs out. Calling this without a session is a no-op.
    pub async fn sign_out(&self) {
        let _gate = self.mutation_gate.lock().await;

        self.clear_persisted().await;

        if let Some(previous) = self.replace_current(None) {
            info!(identity_id = %previous.id(), "signed out");
        }
    }

    /// Merges profile fields into the signed-in identity.
    ///
    /// Role, permissions, features and id are never changed here.
    pub async fn update_profile(&self, patch: ProfilePatch) -> AppResult<Identity> {
        let _gate = self.mutation_gate.lock().await;

        let updated = self
            .with_current(|current| current.map(|identity| identity.with_profile_patch(patch)))
            .ok_or(AppError::NoActiveSession)?;

        self.persist(&updated).await;
        self.replace_current(Some(updated.clone()));

        info!(identity_id = %updated.id(), "profile updated");

        Ok(updated)
    }

    /// Writes the session, or clears whatever was stored before.
    ///
    /// A stored session must never outlive a newer in-memory one, so a
    /// failed write drops the old value and the next reload starts signed out.
    async fn persist(&self, identity: &Identity) {
        let written = match encode_session(identity) {
            Ok(encoded) => {
                self.session_persistence
                    .set(&self.session_key, &encoded)
                    .await
            }
            Err(error) => Err(error),
        };

        if let Err(error) = written {
            warn!(
                identity_id = %identity.id(),
                session_key = %self.session_key,
                error = %error,
                "keeping session in memory only"
            );
            self.clear_persisted().await;
        }
    }

    /// Removes the stored session. When removal fails the value is
    /// overwritten with an empty one, which `restore` treats as absent.
    async fn clear_persisted(&self) {
        let Err(error) = self.session_persistence.remove(&self.session_key).await else {
            return;
        };
        warn!(
            session_key = %self.session_key,
            error = %error,
            "failed to remove persisted session"
        );

        if let Err(error) = self.session_persistence.set(&self.session_key, "").await {
            warn!(
                session_key = %self.session_key,
                error = %error,
                "persisted session could not be cleared"
            );
        }
    }
}
