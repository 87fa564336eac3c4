//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_session_store;
mod in_memory_session_store;
mod redis_session_store;
mod seed_credential_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
pub use seed_credential_store::{SeedAccountSummary, SeedCredentialStore};
