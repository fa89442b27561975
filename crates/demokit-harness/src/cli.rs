#![forbid(unsafe_code)]

//! Command-line argument parsing for the `demokit-harness` binary.
//!
//! Parses args manually. Supports environment variable overrides for the
//! reference directory and record mode.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference directory when neither flag nor environment names one.
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

const HELP_TEXT: &str = "\
demokit-harness: snapshot matrix over the sample demo catalog

USAGE:
    demokit-harness [OPTIONS]

Renders every demo in light and dark appearance on iPad and iPhone and
compares each render with its reference. Prints one JSON record per render
and exits non-zero if any render failed.

OPTIONS:
    --dir=PATH           Reference directory (default: snapshots)
    --group=TITLE        Only snapshot the group with this title
    --record             Write references instead of comparing
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    DEMOKIT_SNAPSHOT_DIR Override --dir
    BLESS                Set to 1 to record
    DEMOKIT_LOG          Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub dir: PathBuf,
    pub group: Option<String>,
    pub record: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            group: None,
            record: false,
        }
    }
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
        let dir_env = env::var("DEMOKIT_SNAPSHOT_DIR").ok();
        match parse_args(&args, dir_env.as_deref()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("demokit-harness {VERSION}");
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

/// Parse `args` (without the program name). Flags override `dir_env`.
pub fn parse_args(args: &[String], dir_env: Option<&str>) -> Result<Command, String> {
    let mut opts = Opts::default();
    if let Some(dir) = dir_env.filter(|d| !d.is_empty()) {
        opts.dir = PathBuf::from(dir);
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--record" => opts.record = true,
            other => {
                if let Some(val) = other.strip_prefix("--dir=") {
                    opts.dir = PathBuf::from(val);
                } else if let Some(val) = other.strip_prefix("--group=") {
                    opts.group = Some(val.to_string());
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(list: &[&str], dir_env: Option<&str>) -> Opts {
        let args: Vec<String> = list.iter().map(|s| (*s).to_string()).collect();
        match parse_args(&args, dir_env) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(run(&[], None), Opts::default());
        assert_eq!(Opts::default().dir, PathBuf::from("snapshots"));
    }

    #[test]
    fn env_dir_then_flag() {
        assert_eq!(run(&[], Some("/refs")).dir, PathBuf::from("/refs"));
        assert_eq!(run(&[], Some("")).dir, PathBuf::from("snapshots"));
        assert_eq!(run(&["--dir=/flag"], Some("/refs")).dir, PathBuf::from("/flag"));
    }

    #[test]
    fn group_and_record() {
        let opts = run(&["--group=Components", "--record"], None);
        assert_eq!(opts.group.as_deref(), Some("Components"));
        assert!(opts.record);
    }

    #[test]
    fn unknown_argument() {
        let args = vec!["--frobnicate".to_string()];
        assert_eq!(
            parse_args(&args, None),
            Err("Unknown argument: --frobnicate".to_string())
        );
        assert_eq!(parse_args(&["-V".to_string()], None), Ok(Command::Version));
        assert!(HELP_TEXT.contains("BLESS"));
    }
}
