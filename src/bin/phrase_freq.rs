//! # chatmd-freq
//!
//! Prints the most frequent short messages found in a directory of exports
//! as CSV, to help curate the noise phrase list.

use std::io;
use std::process;

use clap::Parser as ClapParser;

use chatmd::ChatmdError;
use chatmd::cli::{FreqArgs, init_tracing};
use chatmd::frequency::{count_messages, write_report};

fn main() {
    let args = <FreqArgs as ClapParser>::parse();
    init_tracing();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &FreqArgs) -> Result<(), ChatmdError> {
    let counts = count_messages(&args.directory, args.max_length)?;
    let top = counts.top(args.limit);
    tracing::info!(
        files = counts.files_scanned(),
        phrases = counts.len(),
        printed = top.len(),
        "scan complete"
    );
    write_report(io::stdout().lock(), &top)
}
