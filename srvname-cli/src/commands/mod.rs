//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `reserve`: Reserve the next server name
//! - `commit`: Mark a reservation as in use
//! - `release`: Return a committed reservation to reserved
//! - `delete`: Remove a reservation
//! - `list`: List reservations
//! - `show`: Show one reservation
//! - `stats`: Summarize the store
//! - `preview`: Show the next name without reserving it
//! - `sequences`: List sequence counters
//! - `completions`: Generate shell completion scripts

pub mod commit;
pub mod completions;
pub mod delete;
pub mod list;
pub mod preview;
pub mod release;
pub mod reserve;
pub mod sequences;
pub mod show;
pub mod stats;

pub use commit::CommitCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use list::ListCommand;
pub use preview::PreviewCommand;
pub use release::ReleaseCommand;
pub use reserve::ReserveCommand;
pub use sequences::SequencesCommand;
pub use show::ShowCommand;
pub use stats::StatsCommand;
