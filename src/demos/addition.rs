//! Addition of two numbers: the smallest possible demo.
//!
//! Useful as a template for new models and as a smoke test of the wiring
//! between controls, the orchestrator and `calculate`.

use tracing::debug;

use super::{Model, Outcome, Report};
use crate::config::DemoConfig;
use crate::reactive::{ChangeEvent, Changeable, ChangeableContainer};

/// Adds two integer sliders.
#[derive(Debug)]
pub struct AdditionModel {
    a: Changeable,
    b: Changeable,
    containers: Vec<ChangeableContainer>,
    precision: usize,
}

impl AdditionModel {
    #[must_use]
    pub fn from_config(config: &DemoConfig) -> Self {
        let a = config.addition.a.build("a");
        let b = config.addition.b.build("b");
        Self {
            containers: vec![ChangeableContainer::new(vec![a.clone(), b.clone()])],
            a,
            b,
            precision: config.display.precision,
        }
    }

    /// First summand.
    #[must_use]
    pub const fn a(&self) -> &Changeable {
        &self.a
    }

    /// Second summand.
    #[must_use]
    pub const fn b(&self) -> &Changeable {
        &self.b
    }
}

impl Model for AdditionModel {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn containers(&self) -> &[ChangeableContainer] {
        &self.containers
    }

    fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
        &mut self.containers
    }

    fn calculate(&self) -> Outcome {
        let (a, b) = (self.a.variable(), self.b.variable());
        match a.checked_add(&b) {
            Ok(sum) => Outcome::Ok(
                Report::new("Addition", self.precision)
                    .quantity("First number", "a", a)
                    .quantity("Second number", "b", b)
                    .quantity("Sum", "a + b", sum),
            ),
            Err(e) => Outcome::invalid(e.to_string()),
        }
    }

    fn update(&mut self, change: Option<&ChangeEvent>) {
        debug!(change = ?change.map(|c| &c.name), "addition updated");
    }
}
