use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to a signed-in identity.
///
/// Roles do not form a hierarchy. What a role may do is decided entirely by
/// the permission set and feature matrix seeded for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Owner account with every capability.
    Master,
    /// Company administrator.
    Admin,
    /// Human resources staff.
    Hr,
    /// Regular employee with self-service access.
    Employee,
    /// Any additional role supplied by configuration.
    Custom(String),
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Master => "master",
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Employee => "employee",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Returns the four built-in roles.
    #[must_use]
    pub fn builtin() -> &'static [Self] {
        const BUILTIN: &[Role] = &[Role::Master, Role::Admin, Role::Hr, Role::Employee];

        BUILTIN
    }

    /// Parses a storage value into a role. Unknown names become custom roles.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "master" => Self::Master,
            "admin" => Self::Admin,
            "hr" => Self::Hr,
            "employee" => Self::Employee,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn builtin_roles_roundtrip_storage_value() {
        for role in Role::builtin() {
            assert_eq!(&Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_is_kept_as_custom() {
        let role = Role::parse("payroll_auditor");
        assert_eq!(role, Role::Custom("payroll_auditor".to_owned()));
        assert_eq!(role.as_str(), "payroll_auditor");
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let encoded = serde_json::to_string(&Role::Hr).unwrap_or_default();
        assert_eq!(encoded, "\"hr\"");
    }
}
