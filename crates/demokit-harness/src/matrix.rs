#![forbid(unsafe_code)]

//! The snapshot matrix driver.
//!
//! Every emitted controller is rendered once per appearance and device,
//! appearance outer and device inner:
//!
//! ```text
//! light_iPad, light_iPhone, dark_iPad, dark_iPhone
//! ```
//!
//! Tweakable demos that opt in are emitted once per tweak, with the
//! sanitized tweak identifier as a name suffix. Animations are disabled
//! while a controller is emitted and restored afterwards.

use std::collections::HashSet;
use std::rc::Rc;

use demokit::{DemoGroup, Demoable, Toolkit, choose_strategy};

use crate::config::{Appearance, SnapshotConfig, SnapshotDevice, Traits};
use crate::engine::{ComparisonEngine, ComparisonRequest, SnapshotError, SnapshotOutcome};
use crate::naming::{sanitize, snapshot_name};
use crate::report::{SnapshotRecord, SnapshotReport};

pub struct SnapshotMatrix<'a, T: Toolkit, E: ComparisonEngine<T>> {
    toolkit: &'a T,
    engine: E,
    config: SnapshotConfig,
    seen: HashSet<(String, String)>,
    report: SnapshotReport,
}

impl<'a, T: Toolkit, E: ComparisonEngine<T>> SnapshotMatrix<'a, T, E> {
    pub fn new(toolkit: &'a T, engine: E, config: SnapshotConfig) -> Self {
        Self {
            toolkit,
            engine,
            config,
            seen: HashSet::new(),
            report: SnapshotReport::default(),
        }
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn report(&self) -> &SnapshotReport {
        &self.report
    }

    /// End the run.
    pub fn finish(self) -> SnapshotReport {
        self.report
    }

    /// Snapshot every demo of `group`, in declaration order.
    pub fn snapshot_group(&mut self, group: &dyn DemoGroup<T>) -> Result<(), SnapshotError> {
        tracing::debug!(group = %group.title(), demos = group.count(), "snapshotting group");
        for index in 0..group.count() {
            self.snapshot_demoable(group.demoable_at(index))?;
        }
        Ok(())
    }

    /// Snapshot one demo under its identifier.
    ///
    /// The demo's own controller is rendered without presentation chrome,
    /// so titles, bar buttons and the tweak trigger never reach a
    /// reference. Demos that opt out are skipped. A demo with no
    /// presentable shape is an error naming its identifier.
    pub fn snapshot_demoable(&mut self, demoable: Rc<dyn Demoable<T>>) -> Result<(), SnapshotError> {
        let identifier = demoable.identifier();
        if !demoable.should_snapshot_test() {
            tracing::debug!(%identifier, "snapshot skipped by demo");
            return Ok(());
        }

        let mut controller = choose_strategy(&*demoable)?.into_controller(self.toolkit);
        self.toolkit.layout(&mut controller);

        match demoable.as_tweakable() {
            Some(tweakable) if tweakable.should_snapshot_all_tweaks() && tweakable.tweak_count() > 0 => {
                for index in 0..tweakable.tweak_count() {
                    let tweak = tweakable.tweak_at(index);
                    tweakable.apply_tweak(index);
                    let suffix = sanitize(&tweak.identifier);
                    self.emit(&controller, &identifier, Some(&suffix))?;
                }
            }
            _ => self.emit(&controller, &identifier, None)?,
        }
        Ok(())
    }

    /// Snapshot a bare view in a plain container.
    pub fn snapshot_view(&mut self, test_name: &str, view: T::View) -> Result<(), SnapshotError> {
        let controller = self.toolkit.create_container(view);
        self.snapshot_controller(test_name, controller)
    }

    /// Snapshot declarative content in a host controller.
    pub fn snapshot_content(&mut self, test_name: &str, content: T::Content) -> Result<(), SnapshotError> {
        let controller = self.toolkit.create_declarative_host(content);
        self.snapshot_controller(test_name, controller)
    }

    /// Snapshot a controller as is.
    pub fn snapshot_controller(
        &mut self,
        test_name: &str,
        mut controller: T::Controller,
    ) -> Result<(), SnapshotError> {
        self.toolkit.layout(&mut controller);
        self.emit(&controller, test_name, None)
    }

    fn emit(
        &mut self,
        controller: &T::Controller,
        test_name: &str,
        suffix: Option<&str>,
    ) -> Result<(), SnapshotError> {
        let animations = self.toolkit.animations_enabled();
        self.toolkit.set_animations_enabled(false);
        let result = self.emit_matrix(controller, test_name, suffix);
        self.toolkit.set_animations_enabled(animations);
        result
    }

    fn emit_matrix(
        &mut self,
        controller: &T::Controller,
        test_name: &str,
        suffix: Option<&str>,
    ) -> Result<(), SnapshotError> {
        for appearance in Appearance::ALL {
            for device in SnapshotDevice::ALL {
                let name = snapshot_name(appearance, device, suffix);
                let outcome = self.compare_once(controller, test_name, &name, appearance, device)?;
                tracing::debug!(test_name, %name, ?outcome, "snapshot");
                self.report.records.push(SnapshotRecord {
                    test_name: test_name.to_string(),
                    name,
                    appearance,
                    device,
                    outcome,
                });
            }
        }
        Ok(())
    }

    fn compare_once(
        &mut self,
        controller: &T::Controller,
        test_name: &str,
        name: &str,
        appearance: Appearance,
        device: SnapshotDevice,
    ) -> Result<SnapshotOutcome, SnapshotError> {
        if !self.seen.insert((test_name.to_string(), name.to_string())) {
            let error = SnapshotError::DuplicateName {
                test_name: test_name.to_string(),
                name: name.to_string(),
            };
            tracing::warn!(%error, "snapshot not compared");
            return Ok(SnapshotOutcome::Failed {
                reason: error.to_string(),
            });
        }

        let request = ComparisonRequest {
            test_name,
            name,
            device,
            traits: Traits::new(appearance, device),
            precision: self.config.precision,
            perceptual_precision: self.config.perceptual_precision,
            record: self.config.record,
        };
        match self.engine.compare(controller, &request) {
            Ok(outcome) => Ok(outcome),
            Err(SnapshotError::Io { path, source }) => {
                tracing::warn!(path = %path.display(), %source, "snapshot reference I/O failed");
                Ok(SnapshotOutcome::Failed {
                    reason: SnapshotError::Io { path, source }.to_string(),
                })
            }
            Err(error @ SnapshotError::InvalidName { .. }) => {
                tracing::warn!(%error, "snapshot not compared");
                Ok(SnapshotOutcome::Failed {
                    reason: error.to_string(),
                })
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demokit::{HeadlessController, HeadlessToolkit, HeadlessView};

    /// Records every request instead of comparing.
    #[derive(Default)]
    struct Recorder {
        requests: Vec<(String, String, bool)>,
    }

    impl ComparisonEngine<HeadlessToolkit> for Recorder {
        fn compare(
            &mut self,
            controller: &HeadlessController,
            request: &ComparisonRequest<'_>,
        ) -> Result<SnapshotOutcome, SnapshotError> {
            self.requests.push((
                request.test_name.to_string(),
                request.name.to_string(),
                controller.layout_passes() > 0,
            ));
            Ok(SnapshotOutcome::Matched)
        }
    }

    #[test]
    fn controller_emits_four_in_order() {
        let toolkit = HeadlessToolkit::new();
        let mut matrix = SnapshotMatrix::new(&toolkit, Recorder::default(), SnapshotConfig::default());
        matrix
            .snapshot_view("testBadge", HeadlessView::text(&["badge"]))
            .unwrap();

        let names: Vec<&str> = matrix.engine().requests.iter().map(|r| r.1.as_str()).collect();
        assert_eq!(names, ["light_iPad", "light_iPhone", "dark_iPad", "dark_iPhone"]);
        assert!(matrix.engine().requests.iter().all(|r| r.0 == "testBadge" && r.2));
        assert_eq!(matrix.report().len(), 4);
    }

    #[test]
    fn animations_disabled_then_restored() {
        let toolkit = HeadlessToolkit::new();
        assert!(toolkit.animations_enabled());
        let mut matrix = SnapshotMatrix::new(&toolkit, Recorder::default(), SnapshotConfig::default());
        matrix
            .snapshot_content("testHost", HeadlessView::text(&["host"]))
            .unwrap();
        assert!(toolkit.animations_enabled());
        let journal = toolkit.journal();
        assert!(journal.contains(&"set_animations_enabled:false".to_string()));
        assert_eq!(journal.last().map(String::as_str), Some("set_animations_enabled:true"));
    }

    #[test]
    fn repeated_name_is_reported() {
        let toolkit = HeadlessToolkit::new();
        let mut matrix = SnapshotMatrix::new(&toolkit, Recorder::default(), SnapshotConfig::default());
        matrix.snapshot_view("same", HeadlessView::text(&["a"])).unwrap();
        matrix.snapshot_view("same", HeadlessView::text(&["b"])).unwrap();

        let report = matrix.finish();
        assert_eq!(report.len(), 8);
        assert_eq!(report.failures().count(), 4);
        assert!(report.summary().contains("duplicate snapshot name 'light_iPad' in 'same'"));
    }
}
