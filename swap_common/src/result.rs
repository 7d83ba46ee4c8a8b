//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `SwapError`, so functions can simply return `Result<T>`.
use crate::error::SwapError;

/// Workspace-wide `Result` alias with `SwapError` as the default error.
pub type Result<T, E = SwapError> = std::result::Result<T, E>;
