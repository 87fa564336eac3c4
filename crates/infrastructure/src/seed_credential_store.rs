//! Credential store backed by a seeded account document.
//!
//! The document maps a role name to one account record carrying the email,
//! the password, profile fields, permission tags and the feature matrix.
//! Passwords are reduced to SHA-256 digests at load time.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use peopledesk_application::{CredentialRecord, CredentialStore};
use peopledesk_core::{AppError, AppResult, NonEmptyString};
use peopledesk_domain::{FeatureMatrix, Module, PermissionSet, Profile, Role};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;

const DEMO_CREDENTIALS: &str = include_str!("../seed/demo_credentials.json");

#[derive(Debug, Deserialize)]
struct SeedAccount {
    email: String,
    password: String,
    #[serde(flatten)]
    profile: Profile,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    features: FeatureMatrix,
}

struct SeedEntry {
    password_digest: [u8; 32],
    record: CredentialRecord,
}

/// Public view of a seeded account, without secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccountSummary {
    /// Seeded role.
    pub role: Role,
    /// Account email.
    pub email: String,
}

/// Read-only credential store over seeded accounts.
pub struct SeedCredentialStore {
    entries: Vec<SeedEntry>,
}

impl SeedCredentialStore {
    /// Loads the bundled demo accounts (master, admin, hr, employee).
    pub fn demo() -> AppResult<Self> {
        Self::from_json_str(DEMO_CREDENTIALS)
    }

    /// Loads accounts from a JSON document on disk.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let document = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Validation(format!(
                "failed to read credentials file '{}': {error}",
                path.display()
            ))
        })?;

        Self::from_json_str(&document)
    }

    /// Parses and validates a seed document.
    ///
    /// Empty emails or passwords and duplicate emails are rejected. Registry
    /// modules that a role leaves out are logged and treated as no access.
    pub fn from_json_str(document: &str) -> AppResult<Self> {
        let parsed: Result<BTreeMap<String, SeedAccount>, _> = serde_json::from_str(document);
        let accounts = parsed.map_err(|error| {
            AppError::Validation(format!("invalid credentials document: {error}"))
        })?;

        let mut seen_emails = HashSet::new();
        let mut entries = Vec::with_capacity(accounts.len());

        for (role_name, account) in accounts {
            let role = Role::parse(NonEmptyString::new(role_name)?.as_str());
            let email = NonEmptyString::new(account.email)?;
            let password = NonEmptyString::new(account.password)?;

            if !seen_emails.insert(email.as_str().to_owned()) {
                return Err(AppError::Validation(format!(
                    "email '{}' is seeded more than once",
                    email.as_str()
                )));
            }

            let missing_modules = account.features.missing_modules(Module::all());
            if !missing_modules.is_empty() {
                let missing = missing_modules
                    .iter()
                    .map(Module::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                warn!(
                    role = %role,
                    missing_modules = %missing,
                    "seeded role has no grant for some modules; treating them as no access"
                );
            }

            entries.push(SeedEntry {
                password_digest: password_digest(password.as_str()),
                record: CredentialRecord {
                    role,
                    email: email.into(),
                    profile: account.profile,
                    permissions: account.permissions.into_iter().collect::<PermissionSet>(),
                    features: account.features,
                },
            });
        }

        Ok(Self { entries })
    }

    /// Lists seeded accounts without their passwords.
    #[must_use]
    pub fn accounts(&self) -> Vec<SeedAccountSummary> {
        self.entries
            .iter()
            .map(|entry| SeedAccountSummary {
                role: entry.record.role.clone(),
                email: entry.record.email.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl CredentialStore for SeedCredentialStore {
    async fn lookup(&self, email: &str, password: &str) -> AppResult<Option<CredentialRecord>> {
        let candidate_digest = password_digest(password);

        Ok(self
            .entries
            .iter()
            .find(|entry| {
                entry.record.email == email
                    && digests_match(&entry.password_digest, &candidate_digest)
            })
            .map(|entry| entry.record.clone()))
    }
}

fn password_digest(password: &str) -> [u8; 32] {
    let mut digest = [0_u8; 32];
    digest.copy_from_slice(&Sha256::digest(password.as_bytes()));
    digest
}

fn digests_match(left: &[u8; 32], right: &[u8; 32]) -> bool {
    let difference = left
        .iter()
        .zip(right.iter())
        .fold(0_u8, |difference, (left, right)| difference | (left ^ right));
    difference == 0
}
