//! Signed-in identity and the profile fields it carries.

use chrono::{DateTime, Utc};
use peopledesk_core::IdentityId;
use serde::{Deserialize, Serialize};

use crate::{FeatureMatrix, PermissionSet, Role};

/// Editable profile fields of an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Organisational department.
    pub department: String,
    /// Job title.
    pub position: String,
    /// Company-issued employee code.
    pub employee_code: String,
    /// Contact phone number, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial profile update.
///
/// Only profile fields exist on this type. Payloads that also carry `id`,
/// `role`, `permissions` or `features` deserialize fine and those keys are
/// dropped, so profile editing can never change what an identity may do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New job title.
    pub position: Option<String>,
    /// New contact phone number.
    pub phone: Option<String>,
}

impl ProfilePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply_to(self, profile: &mut Profile) {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = last_name;
        }
        if let Some(department) = self.department {
            profile.department = department;
        }
        if let Some(position) = self.position {
            profile.position = position;
        }
        if let Some(phone) = self.phone {
            profile.phone = Some(phone);
        }
    }
}

/// Authenticated principal with its role, permissions and feature matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: IdentityId,
    email: String,
    role: Role,
    profile: Profile,
    permissions: PermissionSet,
    features: FeatureMatrix,
    signed_in_at: DateTime<Utc>,
}

impl Identity {
    /// Creates an identity from a matched account.
    #[must_use]
    pub fn new(
        id: IdentityId,
        email: impl Into<String>,
        role: Role,
        profile: Profile,
        permissions: PermissionSet,
        features: FeatureMatrix,
        signed_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            role,
            profile,
            permissions,
            features,
            signed_in_at,
        }
    }

    /// Returns the per-sign-in identifier.
    #[must_use]
    pub fn id(&self) -> IdentityId {
        self.id
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the profile fields.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns `first last`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
            .trim()
            .to_owned()
    }

    /// Returns the permission tags.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns the feature matrix.
    #[must_use]
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Returns when the identity signed in.
    #[must_use]
    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }

    /// Returns a copy with the patch merged into the profile.
    ///
    /// Fields absent from the patch keep their value; every other attribute
    /// is carried over untouched.
    #[must_use]
    pub fn with_profile_patch(&self, patch: ProfilePatch) -> Self {
        let mut updated = self.clone();
        patch.apply_to(&mut updated.profile);
        updated
    }
}
