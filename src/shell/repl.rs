//! Interactive prompt loop.
//!
//! Reads one command per line, drives the pool, and prints a status block
//! after every mutating command. All operator-facing output goes to stderr,
//! matching the progress markers, so stdout stays clean for redirection.
//!
//! Errors from a command are printed and the loop keeps accepting input;
//! only `quit`/`exit` or end-of-input leave the loop. An interrupt aborts
//! the current prompt line and re-prompts.

// ============================================================================
// Imports
// ============================================================================

use std::ops::ControlFlow;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::debug;

use crate::error::Result;
use crate::shell::Command;
use crate::transport::{SessionObserver, SessionPool};

// ============================================================================
// MarkerObserver
// ============================================================================

/// Prints one progress marker per lifecycle signal: `+` on open, `-` on
/// close.
///
/// During a large batch the marker stream is the only sign of progress, one
/// character per session.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerObserver;

impl SessionObserver for MarkerObserver {
    fn on_open(&self) {
        eprint!("+");
    }

    fn on_close(&self) {
        eprint!("-");
    }
}

// ============================================================================
// Repl
// ============================================================================

/// The interactive shell driving one [`SessionPool`].
pub struct Repl {
    pool: SessionPool,
}

impl Repl {
    /// Creates a shell around a configured pool.
    #[must_use]
    pub fn new(pool: SessionPool) -> Self {
        Self { pool }
    }

    /// Runs the prompt loop until `quit` or end-of-input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) only if reading stdin itself
    /// fails; command errors are reported inline and never end the loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            eprint!("smbloris> ");

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        // End of input counts as a deliberate quit.
                        eprintln!();
                        break;
                    };

                    match Command::parse(&line) {
                        Ok(Some(command)) => {
                            if self.dispatch(command).await.is_break() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(error) => eprintln!("{error}"),
                    }
                }

                _ = signal::ctrl_c() => {
                    debug!("interrupt at prompt");
                    eprintln!();
                }
            }
        }

        Ok(())
    }

    /// Executes one command against the pool.
    async fn dispatch(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Quit => return ControlFlow::Break(()),

            Command::Help => Self::print_help(),

            Command::Status => self.print_status(),

            Command::Clear => {
                self.pool.clear().await;
                eprintln!();
                self.print_status();
            }

            Command::Add(bytes) => {
                let report = self.pool.grow_by(bytes).await;
                eprintln!();
                if let Some(error) = report.error {
                    eprintln!("{error} ({} sessions added before the failure)", report.added);
                }
                self.print_status();
            }

            Command::Free(bytes) => {
                self.pool.shrink_by(bytes).await;
                eprintln!();
                self.print_status();
            }
        }

        ControlFlow::Continue(())
    }

    fn print_help() {
        eprintln!("Available commands: quit, help, status, clear, add <size>, free <size>");
        eprintln!("Sizes take an optional K/M/G binary suffix: add 64K, free 2G");
    }

    fn print_status(&mut self) {
        eprintln!("Number of connections: {}", self.pool.count());
        eprintln!("Total claimed size: {} bytes", self.pool.total_committed());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;

    async fn repl_against_sink() -> Repl {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        Repl::new(SessionPool::with_port("127.0.0.1", port))
    }

    #[tokio::test]
    async fn test_quit_breaks_the_loop() {
        let mut repl = repl_against_sink().await;
        assert!(repl.dispatch(Command::Quit).await.is_break());
    }

    #[tokio::test]
    async fn test_add_then_free_roundtrip() {
        let mut repl = repl_against_sink().await;

        assert!(repl.dispatch(Command::Add(300_000)).await.is_continue());
        assert_eq!(repl.pool.count(), 3);
        assert_eq!(repl.pool.total_committed(), 300_000);

        assert!(repl.dispatch(Command::Free(131_071)).await.is_continue());
        assert_eq!(repl.pool.count(), 2);
        assert_eq!(repl.pool.total_committed(), 168_929);
    }

    #[tokio::test]
    async fn test_clear_empties_the_pool() {
        let mut repl = repl_against_sink().await;

        assert!(repl.dispatch(Command::Add(50_000)).await.is_continue());
        assert!(repl.dispatch(Command::Clear).await.is_continue());
        assert_eq!(repl.pool.count(), 0);
        assert_eq!(repl.pool.total_committed(), 0);
    }

    #[tokio::test]
    async fn test_status_and_help_do_not_touch_the_pool() {
        let mut repl = repl_against_sink().await;

        assert!(repl.dispatch(Command::Add(1024)).await.is_continue());
        assert!(repl.dispatch(Command::Status).await.is_continue());
        assert!(repl.dispatch(Command::Help).await.is_continue());
        assert_eq!(repl.pool.count(), 1);
    }
}
