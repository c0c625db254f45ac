//! mapstitch CLI - Command-line interface
//!
//! Renders a map image centered on a latitude/longitude from slippy-map tiles.

mod args;
mod error;
mod resolve;
mod runner;

use clap::Parser;

use args::Args;
use error::CliError;
use runner::CliRunner;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref(), args.debug)?;
    runner.log_startup();

    let resolved = resolve::resolve(&args, runner.config())?;
    let report = runner.render(resolved)?;

    println!("{}", report.output.display());
    if let Some(pdf) = &report.pdf {
        println!("{}", pdf.display());
    }

    Ok(())
}
