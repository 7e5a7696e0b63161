//! Shared utilities for the advisor workspace
//!
//! This crate provides common functionality used across the advisor
//! workspace: logging setup and typed environment variable lookup.

pub mod env;
pub mod logging;

pub use env::{EnvVarError, parse_var};
pub use logging::{init_tracing, try_init_tracing};
