#![forbid(unsafe_code)]

//! Command-line argument parsing for the `demokit` binary.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `DEMOKIT_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
demokit: headless session over the sample demo catalog

USAGE:
    demokit [OPTIONS]

Each run is one app launch: the root activates (resuming the last demo if
one was left open), then the requested selections are applied in order
group, demo, tweak, dismiss.

OPTIONS:
    --group=N            Select group N (declaration index)
    --demo=N             Present demo N of the listed group
    --tweak=N            Apply tweak N to the presented demo
    --dismiss            Dismiss the presented demo and return to the list
    --state-path=PATH    Persist navigation state at PATH
    --ephemeral          Keep navigation state in memory only
    --json               Print one JSON object per event
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    DEMOKIT_STATE_PATH   Override --state-path
    DEMOKIT_LOG          Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub group: Option<usize>,
    pub demo: Option<usize>,
    pub tweak: Option<usize>,
    pub dismiss: bool,
    /// Explicit state file; `None` means the per-user default location.
    pub state_path: Option<PathBuf>,
    pub ephemeral: bool,
    pub json: bool,
}

/// What the arguments ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        let state_env = env::var("DEMOKIT_STATE_PATH").ok();
        match parse_args(&args, state_env.as_deref()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("demokit {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` (without the program name). Flags override `state_env`.
pub fn parse_args(args: &[String], state_env: Option<&str>) -> Result<Command, String> {
    let mut opts = Opts {
        state_path: state_env.map(PathBuf::from),
        ..Opts::default()
    };

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--dismiss" => opts.dismiss = true,
            "--ephemeral" => opts.ephemeral = true,
            "--json" => opts.json = true,
            other => {
                if let Some(val) = other.strip_prefix("--group=") {
                    opts.group = Some(parse_index("--group", val)?);
                } else if let Some(val) = other.strip_prefix("--demo=") {
                    opts.demo = Some(parse_index("--demo", val)?);
                } else if let Some(val) = other.strip_prefix("--tweak=") {
                    opts.tweak = Some(parse_index("--tweak", val)?);
                } else if let Some(val) = other.strip_prefix("--state-path=") {
                    opts.state_path = Some(PathBuf::from(val));
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

fn parse_index(flag: &str, val: &str) -> Result<usize, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn no_args_runs_defaults() {
        assert_eq!(parse_args(&[], None), Ok(Command::Run(Opts::default())));
    }

    #[test]
    fn selections_parse() {
        let cmd = parse_args(&args(&["--group=1", "--demo=0", "--tweak=2", "--dismiss"]), None);
        let Ok(Command::Run(opts)) = cmd else {
            panic!("expected run, got {cmd:?}");
        };
        assert_eq!(opts.group, Some(1));
        assert_eq!(opts.demo, Some(0));
        assert_eq!(opts.tweak, Some(2));
        assert!(opts.dismiss);
    }

    #[test]
    fn flag_overrides_env_state_path() {
        let Ok(Command::Run(opts)) = parse_args(&args(&["--state-path=/tmp/a.json"]), Some("/env.json"))
        else {
            panic!("expected run");
        };
        assert_eq!(opts.state_path, Some(PathBuf::from("/tmp/a.json")));

        let Ok(Command::Run(opts)) = parse_args(&[], Some("/env.json")) else {
            panic!("expected run");
        };
        assert_eq!(opts.state_path, Some(PathBuf::from("/env.json")));
    }

    #[test]
    fn bad_values_are_errors() {
        assert_eq!(
            parse_args(&args(&["--demo=x"]), None),
            Err("Invalid --demo value: x".to_string())
        );
        assert!(parse_args(&args(&["--bogus"]), None).is_err());
        assert!(parse_args(&args(&["--group=-1"]), None).is_err());
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse_args(&args(&["-h"]), None), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["--version"]), None), Ok(Command::Version));
        assert!(!VERSION.is_empty());
        assert!(HELP_TEXT.contains("DEMOKIT_STATE_PATH"));
    }
}
