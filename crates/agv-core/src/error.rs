//! Core error type.
//!
//! Sub-crates define their own error enums (`NetError`, `RouteError`,
//! `EngineError`, `OutputError`) following the same pattern.

use thiserror::Error;

/// Errors produced by `agv-core` itself.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Shorthand result type for `agv-core`.
pub type CoreResult<T> = Result<T, CoreError>;
