//! Errors surfaced to the presentation layer.
//!
//! Storage failures are absent on purpose: they are logged where they happen
//! and never reach callers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("a driver with phone `{0}` is already registered")]
    DuplicatePhone(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("only drivers can set availability")]
    NotADriver,
}
