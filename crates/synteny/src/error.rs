//! Error type for rejected input and configuration.
//!
//! Degenerate-but-valid input (empty tracks, single-point scales, equal range
//! bounds) never produces an error; those cases short-circuit to a no-op result.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("element {id:?} is invalid: {reason}")]
    InvalidElement { id: String, reason: &'static str },
    #[error("element id {id:?} appears more than once")]
    DuplicateElement { id: String },
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("invalid scale: {reason}")]
    InvalidScale { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
