/// Shared kernel - error types, result aliases and path/URL guards used by every layer
pub mod error;
pub mod result;
pub mod security;

pub use result::{ResolutionResult, Result};
