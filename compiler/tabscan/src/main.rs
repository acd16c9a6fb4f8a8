//! tabscan CLI
//!
//! Tokenizes one C-like source and prints its tokens.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use tabscan::tracing_setup::init_tracing;
use tabscan::{load_input, run_pass, Command, Config, USAGE};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Command::Scan(config)) => config,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    init_tracing();

    let source = match load_input(&config.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    match run_pass(&source, &config, &mut out) {
        Ok(summary) => {
            if let Some(message) = summary.stall_message() {
                eprintln!("warning: {message}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
