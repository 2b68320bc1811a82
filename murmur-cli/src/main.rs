//! # Murmur
//!
//! An interactive command-line soundscape generator: type a line,
//! hear its sentiment.

use log::error;

mod args;
mod runner;
mod sentiment;

fn main() {
    env_logger::init();
    let matches = args::build_cli().get_matches();

    let code = match runner::run(&matches) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            -1
        }
    };

    std::process::exit(code)
}
