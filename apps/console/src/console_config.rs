use std::env;
use std::path::PathBuf;

use peopledesk_core::{AppError, DEFAULT_SESSION_KEY};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackendConfig {
    File { directory: PathBuf },
    Memory,
    Redis { url: String, ttl_seconds: u64 },
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub session_backend: SessionBackendConfig,
    pub session_key: String,
    pub credentials_file: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let session_key = lookup("PEOPLEDESK_SESSION_KEY")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_owned());

        let credentials_file = lookup("PEOPLEDESK_CREDENTIALS_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let session_backend = match lookup("PEOPLEDESK_SESSION_BACKEND")
            .unwrap_or_else(|| "file".to_owned())
            .as_str()
        {
            "file" => SessionBackendConfig::File {
                directory: lookup("PEOPLEDESK_SESSION_DIR")
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".peopledesk")),
            },
            "memory" => SessionBackendConfig::Memory,
            "redis" => {
                let url = lookup("PEOPLEDESK_REDIS_URL")
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "PEOPLEDESK_REDIS_URL is required for the redis session backend"
                                .to_owned(),
                        )
                    })?;
                let ttl_seconds = lookup("PEOPLEDESK_SESSION_TTL_SECONDS")
                    .map(|value| {
                        value.parse::<u64>().map_err(|error| {
                            AppError::Validation(format!(
                                "invalid PEOPLEDESK_SESSION_TTL_SECONDS: {error}"
                            ))
                        })
                    })
                    .transpose()?
                    .unwrap_or(0);
                SessionBackendConfig::Redis { url, ttl_seconds }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "PEOPLEDESK_SESSION_BACKEND must be 'file', 'memory' or 'redis', got '{other}'"
                )));
            }
        };

        Ok(Self {
            session_backend,
            session_key,
            credentials_file,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use peopledesk_core::AppError;

    use super::{ConsoleConfig, SessionBackendConfig};

    fn load(vars: &[(&str, &str)]) -> Result<ConsoleConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ConsoleConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_file_backend_and_session_key() {
        let config = load(&[]).unwrap_or_else(|_| panic!("default config must load"));
        assert_eq!(
            config.session_backend,
            SessionBackendConfig::File {
                directory: PathBuf::from(".peopledesk")
            }
        );
        assert_eq!(config.session_key, "session");
        assert!(config.credentials_file.is_none());
    }

    #[test]
    fn redis_backend_requires_url() {
        assert!(load(&[("PEOPLEDESK_SESSION_BACKEND", "redis")]).is_err());

        let config = load(&[
            ("PEOPLEDESK_SESSION_BACKEND", "redis"),
            ("PEOPLEDESK_REDIS_URL", "redis://127.0.0.1:6379"),
            ("PEOPLEDESK_SESSION_TTL_SECONDS", "3600"),
        ])
        .unwrap_or_else(|_| panic!("redis config must load"));
        assert_eq!(
            config.session_backend,
            SessionBackendConfig::Redis {
                url: "redis://127.0.0.1:6379".to_owned(),
                ttl_seconds: 3600
            }
        );
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(matches!(
            load(&[("PEOPLEDESK_SESSION_BACKEND", "cookie")]),
            Err(AppError::Validation(_))
        ));
    }
}
