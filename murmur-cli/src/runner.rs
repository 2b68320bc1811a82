//! Wires the scorer, the soundscape, and the interactive input loop.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use clap::ArgMatches;
use log::info;
use murmur_lib::soundscape::Soundscape;

use crate::sentiment;

/// Longest time to let one-shot layers ring out before closing the
/// stream; layer lifetimes top out around ten seconds.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(12);

/// Primary entry for CLI execution.
pub fn run(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let mut soundscape = match args.get_one::<String>("seed") {
        Some(seed) => Soundscape::with_seed(seed.parse()?),
        None => Soundscape::new(),
    };
    let quiet = args.get_flag("quiet");

    if args.get_flag("dry-run") {
        // clap enforces that --dry-run carries --text.
        let text = args.get_one::<String>("text").unwrap();
        let plans = soundscape.hear(&sentiment::score(text));
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(0);
    }

    soundscape.start()?;

    if let Some(text) = args.get_one::<String>("text") {
        feed(&mut soundscape, text, quiet);
        wait_for_silence(&soundscape);
        soundscape.stop();
        return Ok(0);
    }

    info!("reading input from stdin; 'quit' or EOF exits");
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            prompt()?;
            continue;
        }
        if text == "quit" || text == "exit" {
            break;
        }
        feed(&mut soundscape, text, quiet);
        prompt()?;
    }

    // Let whatever is still ringing fade out instead of truncating it.
    wait_for_silence(&soundscape);
    soundscape.stop();
    Ok(0)
}

/// Score one input and hand it to the soundscape.
fn feed(soundscape: &mut Soundscape, text: &str, quiet: bool) {
    let scores = sentiment::score(text);
    let plans = soundscape.hear(&scores);
    if !quiet {
        println!(
            "  [sentiment: pos={:.2} neg={:.2} neu={:.2} compound={:.2}] -> {} layers",
            scores.positive,
            scores.negative,
            scores.neutral,
            scores.compound,
            plans.len()
        );
    }
}

fn prompt() -> io::Result<()> {
    print!("you: ");
    io::stdout().flush()
}

/// Block until the render thread has pruned every layer, or the drain
/// timeout passes.
fn wait_for_silence(soundscape: &Soundscape) {
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    while !soundscape.registry().is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(200));
    }
}
