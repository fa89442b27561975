#![forbid(unsafe_code)]

//! demokit-harness binary entry point.

use std::io;

use demokit::{HeadlessToolkit, sample};
use demokit_harness::cli::Opts;
use demokit_harness::{GoldenTextEngine, HeadlessTextRenderer, SnapshotConfig, SnapshotMatrix};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    init_logging();
    let opts = Opts::parse();

    let config = SnapshotConfig::from_env();
    let config = config.recording(config.record || opts.record);
    let toolkit = HeadlessToolkit::new();
    let engine = GoldenTextEngine::headless(&opts.dir, HeadlessTextRenderer);
    let mut matrix = SnapshotMatrix::new(&toolkit, engine, config);

    let groups = sample::groups();
    let selected: Vec<_> = groups
        .iter()
        .filter(|g| opts.group.as_deref().is_none_or(|title| g.title() == title))
        .collect();
    if selected.is_empty() {
        eprintln!("No group matches {:?}", opts.group.unwrap_or_default());
        std::process::exit(1);
    }

    for group in selected {
        if let Err(e) = matrix.snapshot_group(&**group) {
            eprintln!("Snapshot error: {e}");
            std::process::exit(1);
        }
    }

    let report = matrix.finish();
    for record in &report.records {
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize record"),
        }
    }

    let failed = report.failures().count();
    eprintln!(
        "{} snapshots across {} demos, {failed} failed",
        report.len(),
        report.test_names().len()
    );
    if failed > 0 {
        eprint!("{}", report.summary());
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DEMOKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
