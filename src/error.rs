//! Error types for the smbloris crate.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use smbloris::{Result, SessionPool};
//!
//! async fn example(pool: &mut SessionPool) -> Result<()> {
//!     pool.add_session(4096).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Validation | [`Error::ClaimTooLarge`], [`Error::BadSizeExpression`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectTimeout`] |
//! | Shell | [`Error::UnknownCommand`] |
//! | External | [`Error::Io`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::protocol::MAX_COMMIT;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Requested per-session claim exceeds the header field limit.
    ///
    /// Raised before any network action; the pool is left unchanged.
    #[error("claim of {size} bytes exceeds the per-session limit of {max}")]
    ClaimTooLarge {
        /// The rejected claim size.
        size: u64,
        /// The per-session limit ([`MAX_COMMIT`]).
        max: u32,
    },

    /// Malformed human-readable size expression.
    ///
    /// Raised by the shell before the pool's numeric API is reached.
    #[error("bad size expression {input:?}")]
    BadSizeExpression {
        /// The rejected input, verbatim.
        input: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// TCP connect or header-write failure for one session.
    ///
    /// Sessions already opened by the same batch operation stay in the pool.
    #[error("connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connect attempt did not complete within the configured bound.
    #[error("connect timed out after {timeout_ms}ms")]
    ConnectTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Shell Errors
    // ========================================================================
    /// Input line did not match any known command.
    #[error("unknown command {command:?}")]
    UnknownCommand {
        /// The unrecognized input line.
        command: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a claim-too-large error against [`MAX_COMMIT`].
    #[inline]
    pub fn claim_too_large(size: u64) -> Self {
        Self::ClaimTooLarge {
            size,
            max: MAX_COMMIT,
        }
    }

    /// Creates a bad size-expression error.
    #[inline]
    pub fn bad_size_expression(input: impl Into<String>) -> Self {
        Self::BadSizeExpression {
            input: input.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connect timeout error.
    #[inline]
    pub fn connect_timeout(timeout_ms: u64) -> Self {
        Self::ConnectTimeout { timeout_ms }
    }

    /// Creates an unknown-command error.
    #[inline]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error was raised before any network action.
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ClaimTooLarge { .. } | Self::BadSizeExpression { .. }
        )
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::ConnectTimeout { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
