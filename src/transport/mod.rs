//! TCP transport layer: sessions and the session pool.
//!
//! This module owns every connection the tool makes.
//!
//! # Connection Lifecycle
//!
//! 1. `Session::open` — TCP connect to `target:port`, bounded by the
//!    connect timeout
//! 2. Claim header written — 4 bytes, the session's entire payload
//! 3. Connection held open, peer's receive buffer stays reserved
//! 4. `Session::close` — transport released, idempotent
//!
//! The [`SessionPool`] drives sessions in batches and is the only intended
//! caller of `Session::open`/`close` outside of tests; lifecycle signals
//! flow to a [`SessionObserver`] for status display.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `session` | One connection plus its declared-size header |
//! | `pool` | Ordered session collection and claim accounting |

// ============================================================================
// Submodules
// ============================================================================

/// Session pool and aggregate claim accounting.
pub mod pool;

/// Single probe session and lifecycle observer.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use pool::{GrowReport, SessionPool};
pub use session::{DEFAULT_CONNECT_TIMEOUT, NullObserver, Session, SessionObserver};
