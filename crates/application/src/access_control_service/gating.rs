use peopledesk_domain::{FeatureGrant, Identity, Module};

use super::*;

impl AccessControlService {
    /// Returns a snapshot of the signed-in identity.
    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.with_current(|current| current.cloned())
    }

    /// Returns whether an identity is signed in.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.with_current(|current| match current {
            Some(_) => SessionState::Authenticated,
            None => SessionState::NoSession,
        })
    }

    /// Returns whether the signed-in identity may open the module.
    ///
    /// `false` without a session, for unknown modules and for modules whose
    /// grant has `access=false`.
    #[must_use]
    pub fn has_module_access(&self, module_key: &str) -> bool {
        self.with_current(|current| {
            current.is_some_and(|identity| identity.features().allows(module_key))
        })
    }

    /// Returns whether the signed-in identity holds a module sub-capability.
    ///
    /// Requires module access; unknown capability keys answer `false`.
    #[must_use]
    pub fn has_capability(&self, module_key: &str, capability_key: &str) -> bool {
        self.with_current(|current| {
            current.is_some_and(|identity| {
                identity
                    .features()
                    .allows_capability(module_key, capability_key)
            })
        })
    }

    /// Returns whether the signed-in identity carries a permission tag.
    #[must_use]
    pub fn has_permission(&self, tag: &str) -> bool {
        self.with_current(|current| {
            current.is_some_and(|identity| identity.permissions().contains(tag))
        })
    }

    /// Returns a copy of the module grant so callers can read its level.
    #[must_use]
    pub fn module_grant(&self, module_key: &str) -> Option<FeatureGrant> {
        self.with_current(|current| {
            current.and_then(|identity| identity.features().grant(module_key).cloned())
        })
    }

    /// Returns the registry modules the identity may open, in sidebar order.
    #[must_use]
    pub fn accessible_modules(&self) -> Vec<Module> {
        self.with_current(|current| {
            let Some(identity) = current else {
                return Vec::new();
            };

            Module::all()
                .iter()
                .filter(|module| identity.features().allows(module.as_str()))
                .copied()
                .collect()
        })
    }
}
