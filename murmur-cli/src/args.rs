//! CLI argument definitions for `murmur`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("murmur")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate an ambient soundscape from the sentiment of typed text")
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed the layer RNG for reproducible layer parameters"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .short('t')
                .value_name("TEXT")
                .help("Score a single input instead of reading lines from stdin"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .requires("text")
                .help("Print the layers the input would create as JSON and exit without opening an audio device"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Suppress the per-input sentiment summary"),
        )
}
