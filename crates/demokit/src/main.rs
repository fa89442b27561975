#![forbid(unsafe_code)]

//! demokit binary entry point: one headless launch of the sample catalog.

use std::io;

use demokit::cli::Opts;
use demokit::{CatalogResult, CatalogRoot, HeadlessEnvironment, HeadlessToolkit, sample};
use demokit_runtime::{FileStorage, NavigationState, StorageBackend};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    init_logging();
    let opts = Opts::parse();

    let toolkit = HeadlessToolkit::new();
    let mut root = CatalogRoot::new(sample::catalog(), open_navigation(&opts));
    let mut out = Output { json: opts.json };

    if let Err(e) = run(&opts, &toolkit, &mut root, &mut out) {
        eprintln!("demokit: {e}");
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

fn open_navigation(opts: &Opts) -> NavigationState {
    if opts.ephemeral {
        return NavigationState::in_memory();
    }
    let storage = match &opts.state_path {
        Some(path) => FileStorage::new(path),
        None => FileStorage::default_for_app("sample"),
    };
    if !storage.is_available() {
        tracing::warn!(
            path = %storage.path().display(),
            "state file not writable, selections will not survive this run"
        );
        return NavigationState::in_memory();
    }
    tracing::debug!(path = %storage.path().display(), "navigation state file");
    NavigationState::open(Box::new(storage))
}

fn run(
    opts: &Opts,
    toolkit: &HeadlessToolkit,
    root: &mut CatalogRoot<HeadlessToolkit>,
    out: &mut Output,
) -> CatalogResult<()> {
    if let Some(presentation) = root.activate(toolkit)? {
        out.event("resumed", json!({ "identifier": presentation.identifier() }));
    }
    if let Some(group) = opts.group {
        root.select_group(group)?;
        out.event("group", json!({ "index": group, "title": root.title() }));
    }
    if let Some(index) = opts.demo {
        let presentation = root.select_demo(toolkit, index)?;
        out.event(
            "presented",
            json!({
                "identifier": presentation.identifier(),
                "strategy": presentation.strategy().label(),
            }),
        );
    }
    if let Some(index) = opts.tweak {
        let option = root.select_tweak(index)?;
        out.event(
            "tweak",
            json!({ "index": index, "identifier": option.identifier, "title": option.title }),
        );
    }
    if opts.dismiss
        && let Some(presentation) = root.dismiss()
    {
        out.event("dismissed", json!({ "identifier": presentation.identifier() }));
        root.activate(toolkit)?;
    }

    out.root(root)?;
    if let Some(presentation) = root.presented() {
        let lines = presentation.controller().describe(&HeadlessEnvironment::default());
        out.event("screen", json!({ "lines": lines }));
    }
    Ok(())
}

/// Prints events as text or as one JSON object per line.
struct Output {
    json: bool,
}

impl Output {
    fn event(&mut self, kind: &str, payload: Value) {
        if self.json {
            let mut object = json!({ "event": kind });
            if let (Some(target), Value::Object(fields)) = (object.as_object_mut(), payload) {
                target.extend(fields);
            }
            println!("{object}");
            return;
        }
        match kind {
            "screen" => {
                for line in payload["lines"].as_array().into_iter().flatten() {
                    println!("{}", line.as_str().unwrap_or_default());
                }
            }
            _ => println!("{kind}: {payload}"),
        }
    }

    fn root(&mut self, root: &CatalogRoot<HeadlessToolkit>) -> CatalogResult<()> {
        let sections = root.group_sections()?;
        if self.json {
            let sections: Vec<Value> = sections
                .iter()
                .map(|(key, items)| json!({ "key": key, "items": items }))
                .collect();
            self.event(
                "root",
                json!({
                    "title": root.title(),
                    "group": root.selected_group(),
                    "groups": root.sorted_groups(),
                    "sections": sections,
                }),
            );
            return Ok(());
        }

        println!("{}", root.title());
        for (key, items) in sections.iter() {
            println!("  {key}");
            for item in items {
                println!("    {} [{}]", item.title, item.original_index);
            }
        }
        if let Some(selector) = root.group_selector() {
            let titles: Vec<&str> = selector.rows.iter().map(|row| row.title.as_str()).collect();
            println!("{}: {}", selector.title, titles.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demokit::cli;

    fn opts(list: &[&str]) -> Opts {
        let args: Vec<String> = list.iter().map(|s| (*s).to_string()).collect();
        match cli::parse_args(&args, None) {
            Ok(cli::Command::Run(opts)) => Opts {
                ephemeral: true,
                ..opts
            },
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    fn root() -> CatalogRoot<HeadlessToolkit> {
        CatalogRoot::new(sample::catalog(), NavigationState::in_memory())
    }

    #[test]
    fn unwritable_state_path_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let mut unwritable = opts(&[]);
        unwritable.ephemeral = false;
        unwritable.state_path = Some(blocker.join("state.json"));
        assert_eq!(open_navigation(&unwritable).store().backend_name(), "MemoryStorage");

        let mut writable = unwritable.clone();
        writable.state_path = Some(dir.path().join("state.json"));
        assert_eq!(open_navigation(&writable).store().backend_name(), "FileStorage");
    }

    #[test]
    fn run_presents_and_tweaks() {
        let toolkit = HeadlessToolkit::new();
        let mut root = root();
        let opts = opts(&["--group=1", "--demo=0", "--tweak=2"]);
        run(&opts, &toolkit, &mut root, &mut Output { json: true }).unwrap();
        let presented = root.presented().unwrap();
        assert_eq!(presented.identifier(), "BadgeDemo");
        assert_eq!(root.navigation().selected_tweak(), Some(2));
    }

    #[test]
    fn run_dismiss_clears_demo() {
        let toolkit = HeadlessToolkit::new();
        let mut root = root();
        let opts = opts(&["--group=0", "--demo=1", "--dismiss"]);
        run(&opts, &toolkit, &mut root, &mut Output { json: false }).unwrap();
        assert!(root.presented().is_none());
        assert_eq!(root.navigation().selected_demoable(), None);
        assert_eq!(root.navigation().selected_group(), Some(0));
    }

    #[test]
    fn run_reports_bad_index() {
        let toolkit = HeadlessToolkit::new();
        let mut root = root();
        let opts = opts(&["--group=9"]);
        assert!(run(&opts, &toolkit, &mut root, &mut Output { json: true }).is_err());
    }
}
