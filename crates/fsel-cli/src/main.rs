//! fsel binary entry point.
//!
//! Opens one portal file dialog and prints the selected path on stdout.
//! Exit codes: 0 selected, 1 cancelled, 2 error.

use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use fsel_core::{FilterSpec, LogFormat, OpenFileOptions, Outcome, PortalClient};

#[derive(Debug, Parser)]
#[command(name = "fsel", version, about = "Pick a file via the desktop portal file chooser")]
struct Cli {
    /// Dialog title.
    #[arg(short, long, default_value = "Open File")]
    title: String,

    /// File filter as NAME:SPEC, e.g. "Images:png,jpg". Repeatable.
    #[arg(short, long = "filter", value_name = "NAME:SPEC", value_parser = parse_filter)]
    filter: Vec<FilterSpec>,

    /// Give up after this many seconds instead of waiting forever.
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

fn parse_filter(raw: &str) -> Result<FilterSpec, String> {
    match raw.split_once(':') {
        Some((name, spec)) if !name.is_empty() && !spec.is_empty() => {
            Ok(FilterSpec::new(name, spec))
        }
        _ => Err(format!("expected NAME:SPEC, got {raw:?}")),
    }
}

fn main() {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    if let Err(e) = fsel_core::init_logging(cli.verbose, format) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(2);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "fsel starting");

    let options = OpenFileOptions {
        title: cli.title,
        filters: cli.filter,
        wait_timeout: cli.timeout.map(Duration::from_secs),
    };

    let client = match PortalClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "could not reach the session bus");
            eprintln!("fsel: {e}");
            std::process::exit(2);
        }
    };

    match client.open_file(&options) {
        Ok(Outcome::Selected(path)) => println!("{}", path.display()),
        Ok(Outcome::Cancelled) => {
            info!("dialog cancelled");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "dialog failed");
            eprintln!("fsel: {e}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_argument_parses_name_and_spec() {
        let filter = parse_filter("Images:png,jpg").unwrap();
        assert_eq!(filter.name, "Images");
        assert_eq!(filter.spec, "png,jpg");
    }

    #[test]
    fn filter_argument_requires_both_halves() {
        assert!(parse_filter("Images").is_err());
        assert!(parse_filter(":png").is_err());
        assert!(parse_filter("Images:").is_err());
    }

    #[test]
    fn cli_parses_repeated_filters() {
        let cli = Cli::parse_from([
            "fsel",
            "--filter",
            "Images:png,jpg",
            "--filter",
            "Text:txt",
            "--timeout",
            "30",
        ]);
        assert_eq!(cli.filter.len(), 2);
        assert_eq!(cli.timeout, Some(30));
    }
}
