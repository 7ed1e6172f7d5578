//! Shared response body types for API handlers.
//!
//! Mutating endpoints answer with a JSON object carrying at least a
//! human-readable `message`; reads return the resource itself.

use serde::Serialize;

/// `{ "message": ... }` body for mutations that return nothing else.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
