//! Classroom demos built on the reactive framework.
//!
//! Each demo couples a closed-form physics model to its parameter controls
//! and a sketch drawn onto a [`DisplaySurface`]:
//!
//! 1. [`addition`] - two integer sliders and their sum
//! 2. [`pipe`] - continuity and Bernoulli between two pipe ends
//! 3. [`tank`] - steady water depth above a perforated tank bottom
//! 4. [`elastic_angle`] - free vibration of an elastically supported angle
//!
//! [`exercise`] adds check-your-answer tasks on top of a model.

pub mod addition;
pub mod elastic_angle;
pub mod exercise;
pub mod pipe;
pub mod report;
pub mod tank;

pub use addition::AdditionModel;
pub use elastic_angle::AngleModel;
pub use exercise::{Exercise, Verdict};
pub use pipe::{PipeModel, Shape};
pub use report::{Outcome, Report, ReportEntry};
pub use tank::TankModel;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::reactive::{ChangeEvent, Changeable, ChangeableContainer};
use crate::renderers::DisplaySurface;

/// Physics object behind one demo.
///
/// A model owns its parameter containers. Everything `calculate` reports is
/// derived from the Changeables in those containers; `update` refreshes
/// cached derived state and drives animations.
pub trait Model {
    /// Short identifier.
    fn name(&self) -> &'static str;

    /// Parameter groups in display order.
    fn containers(&self) -> &[ChangeableContainer];

    /// Mutable access for view refreshes.
    fn containers_mut(&mut self) -> &mut [ChangeableContainer];

    /// Evaluate the governing equations for the current parameters.
    ///
    /// Must not mutate; two calls without an intervening change yield the
    /// same outcome.
    fn calculate(&self) -> Outcome;

    /// React to a parameter change (`None` on the initial show).
    fn update(&mut self, change: Option<&ChangeEvent>);

    /// Apply activity flags that depend on selector controls.
    fn sync_inputs(&mut self) {}

    /// Draw the sketch. Models without a sketch draw nothing.
    fn draw(&self, _surface: &mut dyn DisplaySurface) {}

    /// Consume pending animation frames. Returns `true` if the sketch changed.
    fn tick(&mut self) -> bool {
        false
    }

    /// Whether an animation is still producing frames.
    fn is_animating(&self) -> bool {
        false
    }

    /// Cancel running animations.
    fn stop_animation(&mut self) {}

    /// Every Changeable across all containers, in display order.
    fn changeables(&self) -> Vec<Changeable> {
        self.containers()
            .iter()
            .flat_map(|c| c.members().iter().cloned())
            .collect()
    }

    /// Look up a Changeable by name.
    fn find(&self, name: &str) -> Option<Changeable> {
        self.containers().iter().find_map(|c| c.get(name).cloned())
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn containers(&self) -> &[ChangeableContainer] {
        (**self).containers()
    }

    fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
        (**self).containers_mut()
    }

    fn calculate(&self) -> Outcome {
        (**self).calculate()
    }

    fn update(&mut self, change: Option<&ChangeEvent>) {
        (**self).update(change);
    }

    fn sync_inputs(&mut self) {
        (**self).sync_inputs();
    }

    fn draw(&self, surface: &mut dyn DisplaySurface) {
        (**self).draw(surface);
    }

    fn tick(&mut self) -> bool {
        (**self).tick()
    }

    fn is_animating(&self) -> bool {
        (**self).is_animating()
    }

    fn stop_animation(&mut self) {
        (**self).stop_animation();
    }
}

/// Registry of the available demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    Addition,
    Pipe,
    Tank,
    Angle,
}

impl DemoKind {
    /// All demos in listing order.
    pub const ALL: [Self; 4] = [Self::Addition, Self::Pipe, Self::Tank, Self::Angle];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Pipe => "pipe",
            Self::Tank => "tank",
            Self::Angle => "angle",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Addition => "Adds two numbers",
            Self::Pipe => "Continuity and Bernoulli between two pipe ends",
            Self::Tank => "Water depth in a tank with holes in its bottom",
            Self::Angle => "Free vibration of an elastically supported rigid angle",
        }
    }

    /// Construct the demo's model from `config`.
    #[must_use]
    pub fn build(self, config: &DemoConfig) -> Box<dyn Model> {
        match self {
            Self::Addition => Box::new(AdditionModel::from_config(config)),
            Self::Pipe => Box::new(PipeModel::from_config(config)),
            Self::Tank => Box::new(TankModel::from_config(config)),
            Self::Angle => Box::new(AngleModel::from_config(config)),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "addition" | "add" => Ok(Self::Addition),
            "pipe" => Ok(Self::Pipe),
            "tank" => Ok(Self::Tank),
            "angle" | "elastic-angle" | "elastic_angle" => Ok(Self::Angle),
            _ => Err(DemoError::UnknownDemo(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_kind_parse() {
        assert_eq!("pipe".parse::<DemoKind>().ok(), Some(DemoKind::Pipe));
        assert_eq!("Tank".parse::<DemoKind>().ok(), Some(DemoKind::Tank));
        assert_eq!(
            "elastic-angle".parse::<DemoKind>().ok(),
            Some(DemoKind::Angle)
        );
        assert!(matches!(
            "rocket".parse::<DemoKind>(),
            Err(DemoError::UnknownDemo(name)) if name == "rocket"
        ));
    }

    #[test]
    fn test_demo_kind_names_roundtrip() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.name().parse::<DemoKind>().ok(), Some(kind));
            assert!(!kind.description().is_empty());
        }
    }

    #[test]
    fn test_build_every_demo() {
        let config = DemoConfig::builder().animations(false).build();
        for kind in DemoKind::ALL {
            let model = kind.build(&config);
            assert_eq!(model.name(), kind.name());
            assert!(!model.containers().is_empty());
            assert!(!model.changeables().is_empty());
        }
    }

    #[test]
    fn test_calculate_is_repeatable() {
        let config = DemoConfig::builder().animations(false).build();
        for kind in DemoKind::ALL {
            let model = kind.build(&config);
            assert_eq!(model.calculate(), model.calculate());
        }
    }

    #[test]
    fn test_find_changeable() {
        let model = DemoKind::Addition.build(&DemoConfig::default());
        assert!(model.find("a").is_some());
        assert!(model.find("c").is_none());
    }
}
