//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod feature;
mod identity;
mod module;
mod role;

pub use feature::{FeatureGrant, FeatureMatrix, PermissionSet};
pub use identity::{Identity, Profile, ProfilePatch};
pub use module::Module;
pub use role::Role;
