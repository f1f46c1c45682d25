//! Single probe session over one TCP connection.
//!
//! A [`Session`] owns one TCP connection to the target. Opening it performs
//! the entire wire exchange this tool ever does: connect, write the 4-byte
//! claim header, stop. The connection is then held open so the peer keeps
//! the receive buffer it reserved for the declared length.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──connect + header write──► Open ──close()──► Closed (terminal)
//! ```
//!
//! A failed connect or header write never produces a `Session`; the caller
//! has nothing to pool. `close()` is idempotent.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{MAX_COMMIT, claim_header};

// ============================================================================
// Constants
// ============================================================================

/// Default bound on a single connect attempt.
///
/// A hung or slow-accepting peer would otherwise stall a whole batch open
/// indefinitely, since batch operations connect sequentially.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SessionObserver
// ============================================================================

/// Lifecycle signals emitted by sessions.
///
/// Implementations receive exactly one `on_open` per successful open and
/// one `on_close` per close. The signals exist for external status display;
/// nothing in the pool's accounting depends on them.
pub trait SessionObserver: Send + Sync {
    /// Called once after a session's connect and header write succeed.
    fn on_open(&self);

    /// Called once when a session releases its connection.
    fn on_close(&self);
}

/// Observer that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_open(&self) {}
    fn on_close(&self) {}
}

// ============================================================================
// Session
// ============================================================================

/// One transport connection plus its single declared-size header.
///
/// The declared size is a claim advertised to the remote peer, not a local
/// allocation; it is fixed for the session's lifetime.
pub struct Session {
    /// Remote host this session is connected to.
    target: String,
    /// Remote port.
    port: u16,
    /// Declared size, `0 ..= MAX_COMMIT`.
    committed: u32,
    /// Live connection; `None` once closed.
    stream: Option<TcpStream>,
    /// Lifecycle signal sink.
    observer: Arc<dyn SessionObserver>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("port", &self.port)
            .field("committed", &self.committed)
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Opens a session: connects to `target:port` and writes the claim header.
    ///
    /// The header is the session's entire payload; no further bytes are ever
    /// sent. On success the peer is expected to have reserved a `size`-byte
    /// receive buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::ClaimTooLarge`] if `size > MAX_COMMIT`; raised before any
    ///   network action
    /// - [`Error::ConnectTimeout`] if the connect exceeds `connect_timeout`
    /// - [`Error::Connection`] on connect or header-write failure
    pub async fn open(
        target: &str,
        port: u16,
        size: u32,
        connect_timeout: Duration,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        if size > MAX_COMMIT {
            return Err(Error::claim_too_large(u64::from(size)));
        }

        let addr = format!("{target}:{port}");
        let mut stream = timeout(connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| Error::connect_timeout(connect_timeout.as_millis() as u64))?
            .map_err(|e| Error::connection(format!("connect to {addr} failed: {e}")))?;

        stream
            .write_all(&claim_header(size))
            .await
            .map_err(|e| Error::connection(format!("header write to {addr} failed: {e}")))?;

        observer.on_open();
        debug!(host = target, port, size, "session opened");

        Ok(Self {
            target: target.to_owned(),
            port,
            committed: size,
            stream: Some(stream),
            observer,
        })
    }

    /// Closes the session, releasing the transport connection.
    ///
    /// Idempotent: second and later calls are no-ops and emit no signal.
    pub async fn close(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };

        // The peer may already have torn the connection down; nothing to do.
        if let Err(e) = stream.shutdown().await {
            debug!(error = %e, "socket shutdown failed");
        }

        self.observer.on_close();
        debug!(
            host = %self.target,
            port = self.port,
            size = self.committed,
            "session closed"
        );
    }

    /// Returns the declared size fixed at open time.
    #[inline]
    #[must_use]
    pub fn committed_size(&self) -> u32 {
        self.committed
    }

    /// Returns `true` once the session has been closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Returns the remote host.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the remote port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    use crate::protocol::HEADER_LEN;

    #[derive(Default)]
    struct CountingObserver {
        opened: AtomicUsize,
        closed: AtomicUsize,
    }

    impl SessionObserver for CountingObserver {
        fn on_open(&self) {
            self.opened.fetch_add(1, Ordering::SeqCst);
        }
        fn on_close(&self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn bind_local() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        (listener, port)
    }

    #[tokio::test]
    async fn test_open_writes_big_endian_header() {
        let (listener, port) = bind_local().await;

        let session = Session::open(
            "127.0.0.1",
            port,
            37_858,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::new(NullObserver),
        )
        .await
        .expect("open");

        let (mut peer, _) = listener.accept().await.expect("accept");
        let mut header = [0u8; HEADER_LEN];
        peer.read_exact(&mut header).await.expect("read header");
        assert_eq!(header, 37_858u32.to_be_bytes());

        assert_eq!(session.committed_size(), 37_858);
        assert_eq!(session.target(), "127.0.0.1");
        assert_eq!(session.port(), port);
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_open_rejects_oversized_claim_before_connecting() {
        // Port 1 has no listener; a validation failure must win over any
        // connect attempt.
        let result = Session::open(
            "127.0.0.1",
            1,
            MAX_COMMIT + 1,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::new(NullObserver),
        )
        .await;

        let err = result.expect_err("oversized claim must fail");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_open_accepts_maximum_claim() {
        let (_listener, port) = bind_local().await;

        let session = Session::open(
            "127.0.0.1",
            port,
            MAX_COMMIT,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::new(NullObserver),
        )
        .await
        .expect("open at the cap");

        assert_eq!(session.committed_size(), MAX_COMMIT);
    }

    #[tokio::test]
    async fn test_open_connect_failure() {
        let (listener, port) = bind_local().await;
        drop(listener);

        let result = Session::open(
            "127.0.0.1",
            port,
            1024,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::new(NullObserver),
        )
        .await;

        let err = result.expect_err("connect must be refused");
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (_listener, port) = bind_local().await;
        let observer = Arc::new(CountingObserver::default());

        let mut session = Session::open(
            "127.0.0.1",
            port,
            512,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::clone(&observer) as Arc<dyn SessionObserver>,
        )
        .await
        .expect("open");

        session.close().await;
        session.close().await;
        session.close().await;

        assert!(session.is_closed());
        assert_eq!(observer.opened.load(Ordering::SeqCst), 1);
        assert_eq!(observer.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_open_emits_no_signals() {
        let observer = Arc::new(CountingObserver::default());

        let result = Session::open(
            "127.0.0.1",
            1,
            MAX_COMMIT + 1,
            DEFAULT_CONNECT_TIMEOUT,
            Arc::clone(&observer) as Arc<dyn SessionObserver>,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(observer.opened.load(Ordering::SeqCst), 0);
        assert_eq!(observer.closed.load(Ordering::SeqCst), 0);
    }
}
