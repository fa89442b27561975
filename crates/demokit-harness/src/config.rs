#![forbid(unsafe_code)]

//! The render matrix: appearances, devices, and comparison thresholds.

use std::fmt;

use demokit_core::geometry::Size;
use serde::Serialize;

/// Light or dark user interface style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    /// Matrix order: light first.
    pub const ALL: [Appearance; 2] = [Appearance::Light, Appearance::Dark];

    pub const fn name(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Horizontal size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Compact,
    Regular,
}

/// A simulated device a controller is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SnapshotDevice {
    #[serde(rename = "iPad")]
    IPad,
    #[serde(rename = "iPhone")]
    IPhone,
}

impl SnapshotDevice {
    /// Matrix order: tablet first.
    pub const ALL: [SnapshotDevice; 2] = [SnapshotDevice::IPad, SnapshotDevice::IPhone];

    pub const fn name(self) -> &'static str {
        match self {
            SnapshotDevice::IPad => "iPad",
            SnapshotDevice::IPhone => "iPhone",
        }
    }

    /// Portrait screen size in points.
    pub const fn size(self) -> Size {
        match self {
            SnapshotDevice::IPad => Size::new(1024.0, 1366.0),
            SnapshotDevice::IPhone => Size::new(375.0, 812.0),
        }
    }

    pub const fn horizontal_size_class(self) -> SizeClass {
        match self {
            SnapshotDevice::IPad => SizeClass::Regular,
            SnapshotDevice::IPhone => SizeClass::Compact,
        }
    }
}

impl fmt::Display for SnapshotDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Traits a single render runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Traits {
    pub appearance: Appearance,
    pub horizontal_size_class: SizeClass,
}

impl Traits {
    pub fn new(appearance: Appearance, device: SnapshotDevice) -> Self {
        Self {
            appearance,
            horizontal_size_class: device.horizontal_size_class(),
        }
    }
}

/// Comparison thresholds and record mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotConfig {
    /// Share of the output that must match, in `[0, 1]`.
    pub precision: f64,
    /// How closely a unit of output must match to count as matching.
    pub perceptual_precision: f64,
    /// Write references instead of comparing.
    pub record: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            precision: 1.0,
            perceptual_precision: 0.98,
            record: false,
        }
    }
}

impl SnapshotConfig {
    /// Defaults, with record mode taken from `BLESS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            record: is_bless(std::env::var("BLESS").ok().as_deref()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn recording(mut self, record: bool) -> Self {
        self.record = record;
        self
    }
}

fn is_bless(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
