//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CommitCommand, CompletionsCommand, DeleteCommand, ListCommand, PreviewCommand,
    ReleaseCommand, ReserveCommand, SequencesCommand, ShowCommand, StatsCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for generating and reserving server names.
#[derive(Parser)]
#[command(name = "srvname")]
#[command(version, about = "Generate and reserve unique server names", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SRVNAME_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in milliseconds)
    #[arg(long, value_name = "MILLIS", global = true)]
    pub busy_timeout: Option<u64>,

    /// Read configuration from this file instead of <data dir>/config.yaml
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Reserve the next server name
    Reserve(ReserveCommand),

    /// Mark a reservation as in use
    Commit(CommitCommand),

    /// Return a committed reservation to reserved
    Release(ReleaseCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Show reservation statistics
    Stats(StatsCommand),

    /// Show the next name without reserving it
    Preview(PreviewCommand),

    /// List sequence counters
    Sequences(SequencesCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
