use std::process::ExitCode;

use clap::Parser;
use contact_app::platform::{app, cli::Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match app::run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("contact_app: {err:#}");
            ExitCode::FAILURE
        }
    }
}
