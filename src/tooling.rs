//! Tooling Layer
//!
//! Command-line entry points over an explorer session: argument parsing, the
//! line-oriented shell language, and text/JSON rendering.

pub mod cli;
pub mod format;
pub mod shell;

pub use cli::{Cli, CliContext, Commands};
pub use shell::{ShellCommand, ShellOutcome};
