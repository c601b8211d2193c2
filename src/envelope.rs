//! Unwrapping of the generation service's response envelope.
//!
//! The service answers `{ "message": "..." }`, where the message is the work-order JSON
//! wrapped in a code fence: seven leading characters and four trailing ones.

use crate::error::EnvelopeError;
use crate::payload::Payload;
use serde::{Deserialize, Serialize};

/// Number of characters stripped from the front of a service message.
pub const PREFIX_LEN: usize = 7;
/// Number of characters stripped from the back of a service message.
pub const SUFFIX_LEN: usize = 4;

/// Response body of `POST /gen/construct` and `POST /gen/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub message: String,
}

impl ServiceResponse {
    pub fn into_payload(self) -> Result<Payload, EnvelopeError> {
        Payload::from_message(&self.message)
    }
}

/// Returns the text between the fixed-length prefix and suffix.
///
/// Lengths are counted in characters, so a multi-byte character in the wrapper
/// never splits a UTF-8 sequence.
pub fn unwrap_message(message: &str) -> Result<&str, EnvelopeError> {
    let len = message.chars().count();
    if len < PREFIX_LEN + SUFFIX_LEN {
        return Err(EnvelopeError::TooShort { len });
    }

    let byte_offset = |nth: usize| {
        message
            .char_indices()
            .nth(nth)
            .map(|(offset, _)| offset)
            .unwrap_or(message.len())
    };

    Ok(&message[byte_offset(PREFIX_LEN)..byte_offset(len - SUFFIX_LEN)])
}
