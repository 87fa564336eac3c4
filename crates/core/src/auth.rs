use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known persistence key holding the serialized session.
pub const DEFAULT_SESSION_KEY: &str = "session";

/// Opaque identifier minted for every successful sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(Uuid);

impl IdentityId {
    /// Creates a random identity identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identity identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for IdentityId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityId;

    #[test]
    fn identity_id_formats_as_uuid() {
        let identity_id = IdentityId::new();
        assert_eq!(identity_id.to_string().len(), 36);
    }

    #[test]
    fn identity_ids_are_unique_per_mint() {
        assert_ne!(IdentityId::new(), IdentityId::new());
    }
}
