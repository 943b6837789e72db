//! # chatmd CLI
//!
//! Converts one DiscordChatExporter JSON export into a Markdown transcript.

use std::process;

use clap::Parser as ClapParser;
use clap::error::ErrorKind;

use chatmd::ChatmdError;
use chatmd::cli::{Args, init_tracing};
use chatmd::core::{Renderer, write_markdown};
use chatmd::parsing::read_export;

fn main() {
    // Bad or missing arguments show usage without failing the run
    let args = match <Args as ClapParser>::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("Error: {}", io);
                process::exit(1);
            }
            process::exit(0);
        }
    };

    init_tracing();

    if !args.source.is_file() {
        eprintln!("No file found at {}", args.source.display());
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatmdError> {
    let terms = args.noise_terms()?;
    let renderer = Renderer::new(&terms, args.render_config())?;
    tracing::debug!(terms = terms.len(), "noise list loaded");

    let export = read_export(&args.source)?;
    let markdown = renderer.render(&export);
    write_markdown(&args.destination, &markdown)?;

    println!("{}", args.destination.display());
    Ok(())
}
