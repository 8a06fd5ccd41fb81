//! Build script for srvname-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("srvname")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and reserve unique server names")
        .long_about(
            "Command-line tool for allocating structured server names and tracking \
             whether each name is reserved or committed",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SRVNAME_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in milliseconds)")
                .value_name("MILLIS")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file instead of <data dir>/config.yaml")
                .value_name("FILE")
                .global(true),
        )
        .subcommands(vec![
            Command::new("reserve")
                .about("Reserve the next server name")
                .long_about("Allocate the next sequence number for the given fields and reserve the encoded name"),
            Command::new("commit")
                .about("Mark a reservation as in use")
                .long_about("Move a reservation from reserved to committed"),
            Command::new("release")
                .about("Return a committed reservation to reserved")
                .long_about("Move a committed reservation back to reserved, keeping its name"),
            Command::new("delete")
                .about("Delete a reservation")
                .long_about("Remove a reservation, subject to the configured delete policy"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations, newest first, in various formats"),
            Command::new("show")
                .about("Show one reservation")
                .long_about("Display every field of a single reservation"),
            Command::new("stats")
                .about("Show reservation statistics")
                .long_about("Summarize status counts, top environments and regions, and recent activity"),
            Command::new("preview")
                .about("Show the next name without reserving it")
                .long_about("Compute the name the next reserve would produce, without writing"),
            Command::new("sequences")
                .about("List sequence counters")
                .long_about("Display every sequence counter and the next name it would produce"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("srvname.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
