//! Typed environment variable lookup
//!
//! Configuration overrides are read from the environment once at startup.
//! An unset variable falls back to the compiled default; a variable that is
//! set but malformed is a startup error, not something to ignore silently.

use std::str::FromStr;
use thiserror::Error;

/// A set-but-malformed environment variable
#[derive(Debug, Error)]
#[error("environment variable {name}={value:?} is not a valid {expected}")]
pub struct EnvVarError {
    /// Variable name
    pub name: String,
    /// The raw value found
    pub value: String,
    /// Human-readable expected type
    pub expected: &'static str,
}

/// Read and parse an environment variable
///
/// Returns `Ok(None)` when the variable is unset or empty, `Ok(Some)` when
/// it parses, and an [`EnvVarError`] when it is set but does not parse.
pub fn parse_var<T: FromStr>(name: &str, expected: &'static str) -> Result<Option<T>, EnvVarError> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| EnvVarError {
            name: name.to_string(),
            value: raw,
            expected,
        }),
        Err(_) => Ok(None),
    }
}
