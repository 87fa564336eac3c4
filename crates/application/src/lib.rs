//! Application services and ports.

#![forbid(unsafe_code)]

mod access_control_ports;
mod access_control_service;

pub use access_control_ports::{CredentialRecord, CredentialStore, SessionPersistence};
pub use access_control_service::{
    AccessControlService, SESSION_FORMAT_VERSION, SessionState, decode_session, encode_session,
};
