use std::path::PathBuf;
use std::process::ExitCode;

use bib2ris::{bibtex_to_ris_file, Error};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Convert a BibTeX file into RIS (using the Typst biblatex crate).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// input bibtex file
    input: PathBuf,

    /// output ris file, overwritten if it exists
    output: PathBuf,
}

/// Logs go to stderr, stdout is reserved for the user messages below.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args() -> Result<Args, Error> {
    Args::try_parse().map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Usage(Args::command().render_usage().to_string()),
    })
}

fn report(err: &Error, args: &Args) {
    debug!(error = ?err, "conversion failed");
    match err {
        Error::MalformedBibtex(msg) => {
            println!("Malformed BibTeX in {}: {msg}", args.input.display())
        }
        _ => println!("{err}"),
    }
    if err.is_read_failure() {
        println!("Failed to read BibTeX file from {}.", args.input.display());
    }
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            println!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    match bibtex_to_ris_file(&args.input, &args.output) {
        Ok(()) => {
            println!("Text successfully written to {}.", args.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err, &args);
            ExitCode::from(err.exit_code())
        }
    }
}
