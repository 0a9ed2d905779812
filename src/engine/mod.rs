//! Demo orchestration.
//!
//! A [`Demo`] binds a [`Model`] to an optional [`DisplaySurface`] and keeps
//! three views in step with the model's Changeables:
//!
//! - the input view (one [`ContainerView`] per container),
//! - the output (the [`Outcome`] of the last `calculate`),
//! - the drawing on the surface, if one is attached.
//!
//! # Update cycle
//!
//! ```text
//! set_control(name, input)
//!     └─▶ Changeable::on_control_changed
//!             └─▶ subscriber ─▶ queue.push_back(event)
//!                                  │ (Idle only)
//!                                  ▼
//!                            drain: Updating
//!                              ├─ Model::update(event)
//!                              ├─ update_input()  (sync_inputs, containers)
//!                              └─ update_output() (calculate, draw)
//!                            Idle
//! ```
//!
//! Changes fired while an update is running (for example by the model
//! itself) are queued and processed in FIFO order once the current update
//! completes. There is never more than one update in flight.

pub mod animation;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::demos::{Model, Outcome};
use crate::error::{DemoError, DemoResult};
use crate::reactive::{ChangeEvent, ContainerView, ControlInput, Subscription};
use crate::renderers::{CommandRecorder, DisplaySurface};

pub use animation::{AnimationTask, Animator};

/// Orchestrator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateState {
    /// No update running; the next change is processed immediately.
    #[default]
    Idle,
    /// An update is running; incoming changes are queued.
    Updating,
}

struct Shared<M, S> {
    model: RefCell<M>,
    surface: RefCell<Option<S>>,
    queue: RefCell<VecDeque<ChangeEvent>>,
    state: Cell<UpdateState>,
    outcome: RefCell<Option<Outcome>>,
    updates: Cell<u64>,
}

impl<M: Model, S: DisplaySurface> Shared<M, S> {
    fn enqueue(&self, event: ChangeEvent) {
        self.queue.borrow_mut().push_back(event);
        if self.state.get() == UpdateState::Idle {
            self.drain();
        } else {
            trace!(pending = self.queue.borrow().len(), "change queued during update");
        }
    }

    /// Run `f` with updates held back, then process whatever it queued.
    fn deferred<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = self.state.replace(UpdateState::Updating);
        let result = f();
        if previous == UpdateState::Idle {
            self.drain();
        }
        result
    }

    fn drain(&self) {
        self.state.set(UpdateState::Updating);
        loop {
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            self.run_update(Some(&event));
        }
        self.state.set(UpdateState::Idle);
    }

    fn run_update(&self, change: Option<&ChangeEvent>) {
        self.model.borrow_mut().update(change);
        self.updates.set(self.updates.get() + 1);
        self.update_input();
        self.update_output();
    }

    fn update_input(&self) {
        let mut model = self.model.borrow_mut();
        model.sync_inputs();
        for container in model.containers_mut() {
            container.update();
        }
    }

    fn update_output(&self) {
        let outcome = self.model.borrow().calculate();
        if let Outcome::Invalid { reason } = &outcome {
            warn!(%reason, "outcome invalid");
        }
        *self.outcome.borrow_mut() = Some(outcome);
        self.redraw();
    }

    fn redraw(&self) {
        if let Some(surface) = self.surface.borrow_mut().as_mut() {
            self.model.borrow().draw(surface);
        }
    }
}

/// A model wired to its views.
pub struct Demo<M: Model + 'static, S: DisplaySurface + 'static = CommandRecorder> {
    shared: Rc<Shared<M, S>>,
    subscriptions: Vec<Subscription>,
}

impl<M: Model + 'static, S: DisplaySurface + 'static> Demo<M, S> {
    /// Wire every updating Changeable of `model` to the update queue.
    ///
    /// Nothing is rendered until [`show`](Self::show).
    #[must_use]
    pub fn new(model: M, surface: Option<S>) -> Self {
        let changeables = model.changeables();
        let shared = Rc::new(Shared {
            model: RefCell::new(model),
            surface: RefCell::new(surface),
            queue: RefCell::new(VecDeque::new()),
            state: Cell::new(UpdateState::Idle),
            outcome: RefCell::new(None),
            updates: Cell::new(0),
        });

        let subscriptions: Vec<Subscription> = changeables
            .iter()
            .filter(|c| c.should_update())
            .map(|c| {
                let weak: Weak<Shared<M, S>> = Rc::downgrade(&shared);
                c.subscribe(move |event| {
                    if let Some(shared) = weak.upgrade() {
                        shared.enqueue(event.clone());
                    }
                })
            })
            .collect();

        debug!(
            model = shared.model.borrow().name(),
            wired = subscriptions.len(),
            total = changeables.len(),
            "demo wired"
        );
        Self {
            shared,
            subscriptions,
        }
    }

    /// Demo without a drawing surface.
    #[must_use]
    pub fn headless(model: M) -> Self {
        Self::new(model, None)
    }

    /// First full render followed by the initial `Model::update(None)`.
    pub fn show(&self) {
        info!(model = self.shared.model.borrow().name(), "showing demo");
        self.shared.state.set(UpdateState::Updating);
        self.shared.update_input();
        self.shared.update_output();
        self.shared.run_update(None);
        self.shared.drain();
    }

    /// Refresh the control layout only.
    pub fn update_input(&self) {
        self.shared.update_input();
    }

    /// Refresh the computed output and the drawing only.
    pub fn update_output(&self) {
        self.shared.update_output();
    }

    /// Full refresh: input first, then output.
    pub fn update(&self) {
        self.update_input();
        self.update_output();
    }

    /// Host entry point: apply `input` to the control named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::UnknownControl`] if the model has no such
    /// control, or the control's rejection of `input`.
    pub fn set_control(&self, name: &str, input: &ControlInput) -> DemoResult<ChangeEvent> {
        let changeable = self
            .shared
            .model
            .borrow()
            .find(name)
            .ok_or_else(|| DemoError::unknown_control(name))?;
        debug!(name, ?input, "set control");
        changeable.on_control_changed(input)
    }

    /// Run `f` against the model as one update, then refresh both views.
    ///
    /// Changes fired from inside `f` are queued and processed afterwards.
    pub fn with_model<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        self.shared.state.set(UpdateState::Updating);
        let result = f(&mut self.shared.model.borrow_mut());
        self.shared.update_input();
        self.shared.update_output();
        self.shared.drain();
        result
    }

    /// Read-only access to the model.
    ///
    /// Changes fired from inside `f` are queued and processed afterwards.
    pub fn inspect<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        self.shared.deferred(|| f(&self.shared.model.borrow()))
    }

    /// Apply pending animation frames and redraw if anything moved.
    pub fn tick(&self) -> bool {
        let changed = self.shared.model.borrow_mut().tick();
        if changed {
            self.shared.redraw();
        }
        changed
    }

    /// Tick every `interval` for `duration` or until animations finish.
    /// Returns the number of ticks that changed the drawing.
    pub fn animate_for(&self, duration: Duration, interval: Duration) -> usize {
        let start = Instant::now();
        let mut frames = 0;
        while start.elapsed() < duration {
            std::thread::sleep(interval);
            if self.tick() {
                frames += 1;
            }
            if !self.is_animating() {
                break;
            }
        }
        debug!(frames, elapsed_ms = start.elapsed().as_millis(), "animation window closed");
        frames
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shared.model.borrow().is_animating()
    }

    /// Stop the model's animations.
    pub fn stop(&self) {
        self.shared.model.borrow_mut().stop_animation();
    }

    /// Views of all containers, as of the last `update_input`.
    #[must_use]
    pub fn input_views(&self) -> Vec<ContainerView> {
        self.shared
            .model
            .borrow()
            .containers()
            .iter()
            .map(|c| c.view().clone())
            .collect()
    }

    /// Plain-text input view, containers separated by blank lines.
    #[must_use]
    pub fn render_inputs(&self) -> String {
        self.input_views()
            .iter()
            .map(ContainerView::render)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Outcome of the last `update_output`, `None` before [`show`](Self::show).
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.shared.outcome.borrow().clone()
    }

    /// Run `f` against the attached surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.shared.deferred(|| self.shared.surface.borrow().as_ref().map(f))
    }

    /// Number of `Model::update` calls so far.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.shared.updates.get()
    }

    #[must_use]
    pub fn state(&self) -> UpdateState {
        self.shared.state.get()
    }

    /// Number of wired Changeables.
    #[must_use]
    pub fn wired(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<M: Model + 'static, S: DisplaySurface + 'static> std::fmt::Debug for Demo<M, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Demo")
            .field("model", &self.shared.model.borrow().name())
            .field("state", &self.shared.state.get())
            .field("updates", &self.shared.updates.get())
            .field("wired", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use crate::demos::{AdditionModel, PipeModel, Report, TankModel};
    use crate::reactive::{Changeable, ChangeableContainer, Control, Slider};
    use crate::renderers::RenderCommand;

    fn still() -> DemoConfig {
        DemoConfig::builder().animations(false).build()
    }

    /// Model whose update nudges another of its own controls.
    struct Echo {
        source: Changeable,
        mirror: Changeable,
        containers: Vec<ChangeableContainer>,
        seen: Vec<String>,
    }

    impl Echo {
        fn new() -> Self {
            let slider = || Control::Slider(Slider::int(0, 0, 10, 1));
            let source = Changeable::new("source", "Source", slider(), 0, "");
            let mirror = Changeable::new("mirror", "Mirror", slider(), 0, "");
            Self {
                containers: vec![ChangeableContainer::new(vec![
                    Changeable::spacer("header", "Echo"),
                    source.clone(),
                    mirror.clone(),
                ])],
                source,
                mirror,
                seen: Vec::new(),
            }
        }
    }

    impl Model for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn containers(&self) -> &[ChangeableContainer] {
            &self.containers
        }

        fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
            &mut self.containers
        }

        fn calculate(&self) -> Outcome {
            Outcome::Ok(Report::new("Echo", 0).quantity("Mirror", "m", self.mirror.variable()))
        }

        fn update(&mut self, change: Option<&ChangeEvent>) {
            let Some(change) = change else { return };
            self.seen.push(change.name.clone());
            if change.name == "source" {
                self.mirror
                    .on_control_changed(&ControlInput::Int(self.source.value() as i64))
                    .expect("int slider");
            }
        }
    }

    #[test]
    fn test_wiring_skips_spacers() {
        let demo: Demo<Echo> = Demo::headless(Echo::new());
        assert_eq!(demo.wired(), 2);
        assert!(demo.outcome().is_none());
    }

    #[test]
    fn test_reentrant_change_is_queued() {
        let demo: Demo<Echo> = Demo::headless(Echo::new());
        demo.show();
        demo.set_control("source", &ControlInput::Int(4))
            .expect("known control");

        assert_eq!(demo.state(), UpdateState::Idle);
        demo.inspect(|m| assert_eq!(m.seen, vec!["source", "mirror"]));
        // show (None) + source + mirror
        assert_eq!(demo.updates(), 3);
        let outcome = demo.outcome().expect("shown");
        assert!((outcome.get("m").expect("mirror").value() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_change_inside_inspect_is_deferred() {
        let demo: Demo<AdditionModel> = Demo::headless(AdditionModel::from_config(&still()));
        demo.show();
        let before = demo.updates();

        demo.inspect(|m| {
            m.find("a")
                .expect("a")
                .on_control_changed(&ControlInput::Int(2))
                .expect("int slider");
            assert_eq!(demo.state(), UpdateState::Updating);
        });

        assert_eq!(demo.state(), UpdateState::Idle);
        assert_eq!(demo.updates(), before + 1);
        let b = demo.inspect(|m| m.find("b").expect("b").value());
        let sum = demo.outcome().and_then(|o| o.get("a + b").cloned());
        assert_eq!(sum.map(|v| v.value()), Some(2.0 + b));
    }

    #[test]
    fn test_change_inside_with_surface_is_deferred() {
        let demo = Demo::new(
            AdditionModel::from_config(&still()),
            Some(CommandRecorder::new(200.0, 100.0)),
        );
        demo.show();
        let before = demo.updates();
        let a = demo.inspect(|m| m.find("a").expect("a"));
        demo.with_surface(|_| {
            a.on_control_changed(&ControlInput::Int(1)).expect("int slider");
        });
        assert_eq!(demo.updates(), before + 1);
        assert_eq!(demo.state(), UpdateState::Idle);
    }

    #[test]
    fn test_addition_sum_follows_controls() {
        let demo: Demo<AdditionModel> = Demo::headless(AdditionModel::from_config(&still()));
        demo.show();
        demo.set_control("a", &ControlInput::Int(3)).expect("a");
        demo.set_control("b", &ControlInput::Int(5)).expect("b");
        let sum = demo.outcome().and_then(|o| o.get("a + b").cloned());
        assert_eq!(sum.map(|v| v.value()), Some(8.0));
    }

    #[test]
    fn test_unknown_control() {
        let demo: Demo<AdditionModel> = Demo::headless(AdditionModel::from_config(&still()));
        let err = demo
            .set_control("c", &ControlInput::Int(1))
            .expect_err("no such control");
        assert!(matches!(err, DemoError::UnknownControl { name } if name == "c"));
        assert_eq!(demo.updates(), 0);
    }

    #[test]
    fn test_shape_toggle_updates_input_view() {
        let demo: Demo<PipeModel> = Demo::headless(PipeModel::from_config(&still()));
        demo.show();
        let names = |demo: &Demo<PipeModel>| {
            demo.input_views()[0]
                .names()
                .iter()
                .map(|s| (*s).to_string())
                .collect::<Vec<_>>()
        };
        assert!(names(&demo).contains(&"d1".to_string()));
        assert!(!names(&demo).contains(&"w1".to_string()));

        demo.set_control("end1_shape", &ControlInput::Select("Rectangle".into()))
            .expect("toggle");
        let after = names(&demo);
        assert!(!after.contains(&"d1".to_string()));
        assert!(after.contains(&"w1".to_string()));
        assert!(after.contains(&"h1".to_string()));
    }

    #[test]
    fn test_surface_redrawn_on_change() {
        let demo = Demo::new(
            PipeModel::from_config(&still()),
            Some(CommandRecorder::new(600.0, 300.0)),
        );
        demo.show();
        let clears = demo.with_surface(CommandRecorder::clears).expect("surface");
        demo.set_control("u1", &ControlInput::Float(2.0)).expect("u1");
        let after = demo.with_surface(CommandRecorder::clears).expect("surface");
        assert!(after > clears);
        let polygons = demo
            .with_surface(|s| s.count(|c| matches!(c, RenderCommand::Polygon { .. })))
            .expect("surface");
        assert!(polygons >= 1);
    }

    #[test]
    fn test_with_model_refreshes_output() {
        let mut config = still();
        config.tank.flow.initial = 0.03;
        let demo: Demo<TankModel> = Demo::headless(TankModel::from_config(&config));
        demo.show();
        assert!(demo.outcome().is_some_and(|o| o.is_ok()));

        demo.with_model(|tank| tank.set_hole_diameter(0, 0.05));
        assert!(!demo.outcome().is_some_and(|o| o.is_ok()));
    }
}
