//! Interactive command shell.
//!
//! Everything between the operator's keyboard and the pool's numeric API:
//! the command grammar, human-readable size expressions, and the prompt
//! loop with its status display.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Closed set of shell commands and their parser |
//! | `repl` | Prompt loop, dispatch, status display, progress markers |
//! | `size` | `"64K"`-style size-expression parsing |

// ============================================================================
// Submodules
// ============================================================================

/// Shell command variants and parsing.
pub mod command;

/// Interactive prompt loop.
pub mod repl;

/// Human-readable size-expression parsing.
pub mod size;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::Command;
pub use repl::{MarkerObserver, Repl};
pub use size::parse_size_expression;
