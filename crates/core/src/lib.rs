//! Domain building blocks for the QA bank service.
//!
//! Everything in this crate is storage- and transport-agnostic: the shared
//! error type, the identifier alias, the display timestamp
//! formatter, field validation, and export rendering.

pub mod error;
pub mod export;
pub mod record;
pub mod timestamp;
pub mod types;
pub mod validation;
