use serde::{Deserialize, Serialize};

use peopledesk_core::{AppError, AppResult};
use peopledesk_domain::Identity;

/// Version tag written into every persisted session.
pub const SESSION_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SessionEnvelopeRef<'a> {
    version: u32,
    identity: &'a Identity,
}

#[derive(Deserialize)]
struct SessionEnvelope {
    version: u32,
    identity: Identity,
}

/// Serializes an identity into the persisted session format.
pub fn encode_session(identity: &Identity) -> AppResult<String> {
    serde_json::to_string(&SessionEnvelopeRef {
        version: SESSION_FORMAT_VERSION,
        identity,
    })
    .map_err(|error| AppError::Internal(format!("failed to encode session: {error}")))
}

/// Parses a persisted session back into an identity.
///
/// Malformed payloads and envelopes written by another format version are
/// rejected with a validation error.
pub fn decode_session(encoded: &str) -> AppResult<Identity> {
    let envelope: SessionEnvelope = serde_json::from_str(encoded)
        .map_err(|error| AppError::Validation(format!("malformed session payload: {error}")))?;

    if envelope.version != SESSION_FORMAT_VERSION {
        return Err(AppError::Validation(format!(
            "unsupported session format version {}",
            envelope.version
        )));
    }

    Ok(envelope.identity)
}
