#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core types shared by the playground crates: buffer kinds and sandbox policy.

/// Sandbox capability flags for preview execution contexts.
pub mod sandbox;
/// The three editable source kinds.
pub mod source;

pub use sandbox::{SandboxFlagError, SandboxPolicy};
pub use source::{ParseSourceKindError, SourceKind};
