#![forbid(unsafe_code)]

//! Golden-file comparison of controllers rendered as text.
//!
//! References live at `<dir>/<test_name>/<name>.snap`. In record mode the
//! current render overwrites the reference. Otherwise the render passes
//! when the share of matching lines reaches `precision`, where a line
//! matches when its character similarity reaches `perceptual_precision`.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Component, Path, PathBuf};

use demokit::{HeadlessController, HeadlessEnvironment, HeadlessToolkit, Toolkit};

use crate::config::{Appearance, SizeClass, SnapshotDevice, Traits};
use crate::engine::{ComparisonEngine, ComparisonRequest, SnapshotError, SnapshotOutcome};

/// Renders a controller to text for one cell of the matrix.
pub trait TextRenderer<T: Toolkit> {
    fn render(&self, controller: &T::Controller, device: SnapshotDevice, traits: Traits) -> String;
}

/// [`TextRenderer`] for the headless toolkit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessTextRenderer;

impl HeadlessTextRenderer {
    pub fn environment(device: SnapshotDevice, traits: Traits) -> HeadlessEnvironment {
        HeadlessEnvironment {
            dark: traits.appearance == Appearance::Dark,
            size: device.size(),
            compact_width: traits.horizontal_size_class == SizeClass::Compact,
        }
    }
}

impl TextRenderer<HeadlessToolkit> for HeadlessTextRenderer {
    fn render(&self, controller: &HeadlessController, device: SnapshotDevice, traits: Traits) -> String {
        let mut text = controller
            .describe(&Self::environment(device, traits))
            .join("\n");
        text.push('\n');
        text
    }
}

/// Golden text [`ComparisonEngine`].
pub struct GoldenTextEngine<T: Toolkit, R: TextRenderer<T>> {
    dir: PathBuf,
    renderer: R,
    _toolkit: PhantomData<fn() -> T>,
}

impl<T: Toolkit, R: TextRenderer<T>> GoldenTextEngine<T, R> {
    pub fn new(dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            dir: dir.into(),
            renderer,
            _toolkit: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reference file for `test_name`/`name`.
    ///
    /// Both must be single path components so the file stays under
    /// [`dir`](Self::dir).
    pub fn reference_path(&self, test_name: &str, name: &str) -> Result<PathBuf, SnapshotError> {
        if !is_single_component(test_name) || !is_single_component(name) {
            return Err(SnapshotError::InvalidName {
                test_name: test_name.to_string(),
                name: name.to_string(),
            });
        }
        Ok(self.dir.join(test_name).join(format!("{name}.snap")))
    }
}

impl<R: TextRenderer<HeadlessToolkit>> GoldenTextEngine<HeadlessToolkit, R> {
    /// Engine over the headless toolkit.
    pub fn headless(dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self::new(dir, renderer)
    }
}

impl<T: Toolkit, R: TextRenderer<T>> ComparisonEngine<T> for GoldenTextEngine<T, R> {
    fn compare(
        &mut self,
        controller: &T::Controller,
        request: &ComparisonRequest<'_>,
    ) -> Result<SnapshotOutcome, SnapshotError> {
        let path = self.reference_path(request.test_name, request.name)?;
        let actual = self.renderer.render(controller, request.device, request.traits);

        if request.record {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, &actual).map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "snapshot recorded");
            return Ok(SnapshotOutcome::Recorded);
        }

        let expected = match fs::read_to_string(&path) {
            Ok(expected) => expected,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(SnapshotOutcome::Failed {
                    reason: format!(
                        "No reference found at {}. Run with BLESS=1 to create it.\n\nActual output:\n{actual}",
                        path.display()
                    ),
                });
            }
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        let expected = normalize(&expected);
        let actual = normalize(&actual);
        let score = match_ratio(&expected, &actual, request.perceptual_precision);
        if score >= request.precision {
            Ok(SnapshotOutcome::Matched)
        } else {
            Ok(SnapshotOutcome::Failed {
                reason: format!(
                    "File: {}\nMatched {:.1}% of lines (need {:.1}%).\n\nDiff (- expected, + actual):\n{}",
                    path.display(),
                    score * 100.0,
                    request.precision * 100.0,
                    diff_text(&expected, &actual)
                ),
            })
        }
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

// ============================================================================
// Normalization & Scoring
// ============================================================================

/// Trim trailing whitespace on each line and drop trailing blank lines.
fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Position-wise character similarity in `[0, 1]`.
pub fn line_similarity(expected: &str, actual: &str) -> f64 {
    let e: Vec<char> = expected.chars().collect();
    let a: Vec<char> = actual.chars().collect();
    let longest = e.len().max(a.len());
    if longest == 0 {
        return 1.0;
    }
    let same = e.iter().zip(&a).filter(|(x, y)| x == y).count();
    same as f64 / longest as f64
}

/// Share of lines whose similarity reaches `perceptual_precision`.
pub fn match_ratio(expected: &str, actual: &str, perceptual_precision: f64) -> f64 {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let total = expected_lines.len().max(actual_lines.len());
    if total == 0 {
        return 1.0;
    }
    let matching = (0..total)
        .filter(|&i| match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) => line_similarity(e, a) >= perceptual_precision,
            _ => false,
        })
        .count();
    matching as f64 / total as f64
}

// ============================================================================
// Diff
// ============================================================================

/// Line-by-line diff: ` ` common, `-` expected only, `+` actual only.
///
/// Returns an empty string when the inputs are identical.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        match (expected_lines.get(i).copied(), actual_lines.get(i).copied()) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, " {e}");
            }
            (Some(e), Some(a)) => {
                let _ = writeln!(out, "-{e}");
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (Some(e), None) => {
                let _ = writeln!(out, "-{e}");
                has_diff = true;
            }
            (None, Some(a)) => {
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}
