//! Reports the capability level selected for this host as JSON.
//!
//! Selection runs exactly as it would inside a library consumer: the
//! environment configuration is read, the marker ladder is probed once, and
//! the resulting adapter is snapshotted. Logs go to stderr (filtered by
//! `RUST_LOG`, default `warn`) so stdout stays a single JSON object.

use anyhow::{Result, bail};
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1))?;
    let adapter = hostcompat::adapter();
    let snapshot = adapter.snapshot();

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{rendered}");
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Cli {
    pretty: bool,
}

impl Cli {
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Cli::default();
        for arg in args {
            match arg.as_str() {
                "--pretty" => cli.pretty = true,
                "-h" | "--help" => usage_and_exit(0),
                other => bail!("Unknown argument: {other}\n{USAGE}"),
            }
        }
        Ok(cli)
    }
}

const USAGE: &str = "Usage: detect-compat [--pretty]";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!("{USAGE}");
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_arguments_is_compact() {
        assert_eq!(Cli::parse(args(&[])).unwrap(), Cli { pretty: false });
    }

    #[test]
    fn pretty_flag() {
        assert_eq!(
            Cli::parse(args(&["--pretty"])).unwrap(),
            Cli { pretty: true }
        );
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = Cli::parse(args(&["--level9"])).unwrap_err();
        assert!(err.to_string().contains("Unknown argument: --level9"));
    }
}
