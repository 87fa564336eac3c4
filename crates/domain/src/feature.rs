//! Feature grants and permission tags attached to an identity.
//!
//! Every lookup in this module is deny-by-default: an unknown module, an
//! unknown capability or an unknown permission tag answers `false`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::Module;

const LEVEL_NONE: &str = "none";

/// Field names of the grant itself; a capability may not shadow them.
const RESERVED_KEYS: &[&str] = &["access", "level"];

fn default_level() -> String {
    LEVEL_NONE.to_owned()
}

/// Capability record for one module.
///
/// `level` is a free-form granularity tag (`full`, `hr`, `self`, `view`,
/// `profile`, `none`) interpreted by the consuming screen. Sub-capabilities
/// such as `canCreate` or `canApprove` are flattened next to `access` and
/// `level` in the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGrant {
    #[serde(default)]
    access: bool,
    #[serde(default = "default_level")]
    level: String,
    #[serde(flatten)]
    capabilities: BTreeMap<String, bool>,
}

impl FeatureGrant {
    /// Creates a grant without any sub-capabilities.
    #[must_use]
    pub fn new(access: bool, level: impl Into<String>) -> Self {
        Self {
            access,
            level: level.into(),
            capabilities: BTreeMap::new(),
        }
    }

    /// Creates a grant that hides the module entirely.
    #[must_use]
    pub fn denied() -> Self {
        Self::new(false, LEVEL_NONE)
    }

    /// Returns the grant with one sub-capability set.
    ///
    /// `access` and `level` are not capability names and are ignored here.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>, enabled: bool) -> Self {
        let capability = capability.into();
        if !RESERVED_KEYS.contains(&capability.as_str()) {
            self.capabilities.insert(capability, enabled);
        }
        self
    }

    /// Returns whether the module is visible and usable at all.
    #[must_use]
    pub fn access(&self) -> bool {
        self.access
    }

    /// Returns the granularity tag.
    #[must_use]
    pub fn level(&self) -> &str {
        self.level.as_str()
    }

    /// Returns the named sub-capability flag. Absent flags are `false`.
    #[must_use]
    pub fn capability(&self, capability: &str) -> bool {
        self.capabilities.get(capability).copied().unwrap_or(false)
    }

    /// Returns the names of all enabled sub-capabilities.
    pub fn enabled_capabilities(&self) -> impl Iterator<Item = &str> {
        self.capabilities
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }
}

impl Default for FeatureGrant {
    fn default() -> Self {
        Self::denied()
    }
}

/// Module key to [`FeatureGrant`] mapping for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMatrix(BTreeMap<String, FeatureGrant>);

impl FeatureMatrix {
    /// Creates an empty matrix, which denies every module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the matrix with one module grant set.
    #[must_use]
    pub fn with_grant(mut self, module_key: impl Into<String>, grant: FeatureGrant) -> Self {
        self.0.insert(module_key.into(), grant);
        self
    }

    /// Returns the grant stored for a module key, if any.
    #[must_use]
    pub fn grant(&self, module_key: &str) -> Option<&FeatureGrant> {
        self.0.get(module_key)
    }

    /// Returns whether the module is present and grants access.
    #[must_use]
    pub fn allows(&self, module_key: &str) -> bool {
        self.grant(module_key).is_some_and(FeatureGrant::access)
    }

    /// Returns whether the module grants access and enables the capability.
    #[must_use]
    pub fn allows_capability(&self, module_key: &str, capability: &str) -> bool {
        self.grant(module_key)
            .is_some_and(|grant| grant.access() && grant.capability(capability))
    }

    /// Returns registry modules that have no entry in this matrix.
    #[must_use]
    pub fn missing_modules(&self, registry: &[Module]) -> Vec<Module> {
        registry
            .iter()
            .filter(|module| !self.0.contains_key(module.as_str()))
            .copied()
            .collect()
    }

    /// Iterates over module keys and grants in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureGrant)> {
        self.0.iter().map(|(key, grant)| (key.as_str(), grant))
    }
}

/// Flat set of permission tags such as `approve_leave_requests`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// Returns whether the tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Returns the number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{FeatureGrant, FeatureMatrix, PermissionSet};
    use crate::Module;

    fn payroll_self_service() -> FeatureMatrix {
        FeatureMatrix::new()
            .with_grant(
                "payroll",
                FeatureGrant::new(true, "self").with_capability("canExport", true),
            )
            .with_grant(
                "reports",
                FeatureGrant::new(false, "none").with_capability("canExport", true),
            )
    }

    #[test]
    fn missing_module_is_denied() {
        let matrix = payroll_self_service();
        assert!(!matrix.allows("employees"));
        assert!(!matrix.allows_capability("employees", "canCreate"));
    }

    #[test]
    fn capability_requires_module_access() {
        let matrix = payroll_self_service();
        assert!(matrix.allows_capability("payroll", "canExport"));
        assert!(!matrix.allows_capability("reports", "canExport"));
    }

    #[test]
    fn absent_capability_is_false() {
        let grant = FeatureGrant::new(true, "full");
        assert!(!grant.capability("canDelete"));
    }

    #[test]
    fn grant_flattens_capabilities_in_json() {
        let grant: Result<FeatureGrant, _> = serde_json::from_str(
            r#"{"access":true,"level":"hr","canApprove":true,"canDelete":false}"#,
        );
        let grant = grant.unwrap_or_default();
        assert!(grant.access());
        assert_eq!(grant.level(), "hr");
        assert!(grant.capability("canApprove"));
        assert!(!grant.capability("canDelete"));
        assert_eq!(
            grant.enabled_capabilities().collect::<Vec<_>>(),
            vec!["canApprove"]
        );
    }

    #[test]
    fn grant_without_level_defaults_to_none() {
        let grant: Result<FeatureGrant, _> = serde_json::from_str(r#"{"access":false}"#);
        let grant = grant.unwrap_or_else(|_| FeatureGrant::new(true, "full"));
        assert_eq!(grant.level(), "none");
    }

    #[test]
    fn reserved_names_are_not_capabilities() {
        let grant = FeatureGrant::new(true, "hr")
            .with_capability("access", false)
            .with_capability("level", true)
            .with_capability("canApprove", true);

        assert!(grant.access());
        assert_eq!(grant.level(), "hr");
        assert!(!grant.capability("level"));
        assert_eq!(
            grant.enabled_capabilities().collect::<Vec<_>>(),
            vec!["canApprove"]
        );

        let encoded = serde_json::to_string(&grant).unwrap_or_default();
        assert_eq!(encoded, r#"{"access":true,"level":"hr","canApprove":true}"#);
        let decoded: Result<FeatureGrant, _> = serde_json::from_str(&encoded);
        assert_eq!(decoded.ok(), Some(grant));
    }

    #[test]
    fn missing_modules_reports_registry_gaps() {
        let matrix = payroll_self_service();
        let missing = matrix.missing_modules(Module::all());
        assert!(missing.contains(&Module::Dashboard));
        assert!(!missing.contains(&Module::Payroll));
        assert!(!missing.contains(&Module::Reports));
    }

    proptest! {
        #[test]
        fn empty_matrix_denies_everything(
            module in "[a-z_]{0,16}",
            capability in "[a-zA-Z]{0,16}"
        ) {
            let matrix = FeatureMatrix::new();
            prop_assert!(!matrix.allows(&module));
            prop_assert!(!matrix.allows_capability(&module, &capability));
        }

        #[test]
        fn permission_set_collapses_duplicates(
            tags in proptest::collection::vec("[a-z_]{1,12}", 0..24)
        ) {
            let set: PermissionSet = tags.iter().cloned().chain(tags.iter().cloned()).collect();
            let mut distinct = tags.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(set.len(), distinct.len());
            for tag in &tags {
                prop_assert!(set.contains(tag));
            }
        }
    }
}
