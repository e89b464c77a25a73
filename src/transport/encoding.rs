//! Transport-safe form of a finished command stream.
//!
//! Streams cross the transport boundary as standard-alphabet base64 with
//! padding. Decoding reproduces the original bytes exactly.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::SetuError;

/// Encode a raw command stream for handoff to a transport.
///
/// ```
/// use setu::transport::encoding;
///
/// assert_eq!(encoding::encode(&[0x1B, 0x40]), "G0A=");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Recover the raw command stream from its transport form.
pub fn decode(payload: &str) -> Result<Vec<u8>, SetuError> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| SetuError::Transport(format!("invalid base64 payload: {}", e)))
}
