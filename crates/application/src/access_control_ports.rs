//! Ports consumed by the access-control service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use peopledesk_core::{AppResult, IdentityId};
use peopledesk_domain::{FeatureMatrix, Identity, PermissionSet, Profile, Role};

/// Account data returned by a successful credential lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Role seeded for the account.
    pub role: Role,
    /// Account email, exactly as stored.
    pub email: String,
    /// Profile fields copied into the identity.
    pub profile: Profile,
    /// Permission tags granted to the role.
    pub permissions: PermissionSet,
    /// Per-module feature grants for the role.
    pub features: FeatureMatrix,
}

impl CredentialRecord {
    /// Builds a fresh identity for this account.
    #[must_use]
    pub fn into_identity(self, id: IdentityId, signed_in_at: DateTime<Utc>) -> Identity {
        Identity::new(
            id,
            self.email,
            self.role,
            self.profile,
            self.permissions,
            self.features,
            signed_in_at,
        )
    }
}

/// Source of truth for email/password pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the account whose email and password both match exactly.
    ///
    /// Matching is case-sensitive. `Ok(None)` means no account matched.
    async fn lookup(&self, email: &str, password: &str) -> AppResult<Option<CredentialRecord>>;
}

/// Key/value store that keeps the serialized session across restarts.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
