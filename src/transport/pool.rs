//! Session pool and aggregate claim accounting.
//!
//! Manages the ordered collection of live [`Session`]s against one target
//! and turns byte-denominated requests ("grow the total claim by X bytes")
//! into batches of session opens and closes under the per-session cap.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               SessionPool                │
//! │            (one target:port)             │
//! │  ┌────────────────────────────────────┐  │
//! │  │ Session 0 → claim 131071 (oldest)  │  │
//! │  │ Session 1 → claim 131071           │  │
//! │  │ Session 2 → claim  37858 (newest)  │  │
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Insertion order is creation order and is what `shrink_by` walks:
//! releasing claim always frees the longest-held sessions first.
//!
//! # Pruning
//!
//! Every query and batch operation starts with a compaction pass that drops
//! sessions already observed closed, preserving order. Nothing is closed by
//! the pass itself; those connections are already gone.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::protocol::{MAX_COMMIT, SMB_PORT};
use crate::transport::session::DEFAULT_CONNECT_TIMEOUT;
use crate::transport::{NullObserver, Session, SessionObserver};

// ============================================================================
// GrowReport
// ============================================================================

/// Outcome of a [`SessionPool::grow_by`] batch.
///
/// A batch that fails partway keeps its successfully opened sessions (no
/// rollback) and surfaces the error here next to the count.
#[derive(Debug)]
#[must_use]
pub struct GrowReport {
    /// Number of sessions the batch added to the pool.
    pub added: usize,
    /// The error that stopped the batch, if any.
    pub error: Option<Error>,
}

impl GrowReport {
    /// Returns `true` if the batch reached its full requested amount.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

// ============================================================================
// SessionPool
// ============================================================================

/// Ordered collection of live sessions against one target.
///
/// The pool is driven by a single logical controller; methods take
/// `&mut self` and nothing is shared, so no locking is involved. Batch
/// opens connect sequentially and block the caller for the cumulative
/// connect latency, bounded per session by the connect timeout.
///
/// # Example
///
/// ```ignore
/// let mut pool = SessionPool::new("192.0.2.10");
/// let report = pool.grow_by(64 << 20).await;
/// println!("{} sessions, {} bytes claimed", pool.count(), pool.total_committed());
/// ```
pub struct SessionPool {
    /// Remote host every session connects to.
    target: String,
    /// Remote port.
    port: u16,
    /// Per-session connect bound.
    connect_timeout: Duration,
    /// Signal sink handed to every session this pool opens.
    observer: Arc<dyn SessionObserver>,
    /// Live sessions, oldest first.
    sessions: Vec<Session>,
}

// ============================================================================
// SessionPool - Constructors
// ============================================================================

impl SessionPool {
    /// Creates an empty pool against `target` on the default port.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_port(target, SMB_PORT)
    }

    /// Creates an empty pool against `target` on a specific port.
    #[must_use]
    pub fn with_port(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            observer: Arc::new(NullObserver),
            sessions: Vec::new(),
        }
    }

    /// Sets the lifecycle observer handed to every session this pool opens.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets the per-session connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

// ============================================================================
// SessionPool - Queries
// ============================================================================

impl SessionPool {
    /// Returns the number of live sessions, after pruning.
    #[must_use]
    pub fn count(&mut self) -> usize {
        self.prune();
        self.sessions.len()
    }

    /// Returns the sum of declared sizes over live sessions, after pruning.
    #[must_use]
    pub fn total_committed(&mut self) -> u64 {
        self.prune();
        self.sessions
            .iter()
            .map(|s| u64::from(s.committed_size()))
            .sum()
    }

    /// Returns the remote host this pool targets.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the remote port this pool targets.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

// ============================================================================
// SessionPool - Mutations
// ============================================================================

impl SessionPool {
    /// Opens one session with the given claim and appends it.
    ///
    /// # Errors
    ///
    /// - [`Error::ClaimTooLarge`] if `size > MAX_COMMIT`; no connection is
    ///   attempted
    /// - [`Error::Connection`] / [`Error::ConnectTimeout`] on open failure
    ///
    /// The pool is left unchanged on failure.
    pub async fn add_session(&mut self, size: u32) -> Result<()> {
        self.prune();
        let session = self.open_session(size).await?;
        self.sessions.push(session);
        Ok(())
    }

    /// Adds sessions whose claims sum to exactly `total_bytes`.
    ///
    /// Greedy chunking: each new session claims
    /// `min(remaining, MAX_COMMIT)`, so the batch yields
    /// `total_bytes.div_ceil(MAX_COMMIT)` sessions, all but the last at the
    /// cap.
    ///
    /// A failure partway stops the batch. Sessions already opened remain in
    /// the pool and the report carries both the added count and the error.
    pub async fn grow_by(&mut self, total_bytes: u64) -> GrowReport {
        self.prune();

        let mut added = 0;
        let mut remaining = total_bytes;
        while remaining > 0 {
            let size = remaining.min(u64::from(MAX_COMMIT)) as u32;
            match self.open_session(size).await {
                Ok(session) => {
                    self.sessions.push(session);
                    added += 1;
                    remaining -= u64::from(size);
                }
                Err(error) => {
                    warn!(added, remaining, %error, "grow stopped early");
                    return GrowReport {
                        added,
                        error: Some(error),
                    };
                }
            }
        }

        debug!(added, total_bytes, "pool grown");
        GrowReport { added, error: None }
    }

    /// Closes and removes the oldest sessions until at least `total_bytes`
    /// of claim has been released.
    ///
    /// The minimal oldest-first prefix whose claims sum to `≥ total_bytes`
    /// is closed; sessions beyond it are untouched. If `total_bytes`
    /// exceeds the pool's aggregate claim, the entire pool is closed.
    pub async fn shrink_by(&mut self, total_bytes: u64) {
        self.prune();

        let mut cut = 0;
        let mut released: u64 = 0;
        for session in &self.sessions {
            if released >= total_bytes {
                break;
            }
            released += u64::from(session.committed_size());
            cut += 1;
        }

        for mut session in self.sessions.drain(..cut) {
            session.close().await;
        }

        if cut > 0 {
            debug!(sessions = cut, released, "pool shrunk");
        }
    }

    /// Closes and removes every session, regardless of amount.
    pub async fn clear(&mut self) {
        let count = self.sessions.len();
        for mut session in self.sessions.drain(..) {
            session.close().await;
        }

        if count > 0 {
            debug!(sessions = count, "pool cleared");
        }
    }
}

// ============================================================================
// SessionPool - Internals
// ============================================================================

impl SessionPool {
    /// Opens one session against this pool's endpoint.
    async fn open_session(&self, size: u32) -> Result<Session> {
        Session::open(
            &self.target,
            self.port,
            size,
            self.connect_timeout,
            Arc::clone(&self.observer),
        )
        .await
    }

    /// Drops sessions already observed closed, preserving insertion order.
    fn prune(&mut self) {
        let before = self.sessions.len();
        self.sessions.retain(|s| !s.is_closed());

        let dropped = before - self.sessions.len();
        if dropped > 0 {
            debug!(dropped, "pruned externally closed sessions");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
