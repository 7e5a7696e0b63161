//! Tool contract framework for advisor-rs
//!
//! This crate provides the plumbing that lets agents discover and call
//! tools: [`ToolContract`] wraps an async operation together with its
//! signature metadata, and [`ToolRegistry`] groups contracts under a
//! namespace with stable, registration-ordered discovery.

pub mod contract;
pub mod registry;

pub use contract::{ArgSpec, ToolContract, ToolContractBuilder, ToolFuture, ValueType};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
