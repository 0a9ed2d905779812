//! Configuration system with YAML schema and validation.
//!
//! Every slider of every demo is described by a [`SliderConfig`], so ranges
//! and initial values can be tuned without touching model code. Validation
//! happens in two passes:
//! - schema constraints via `validator` (`#[validate(..)]` attributes)
//! - semantic checks (`min <= initial <= max`, positive step)
//!
//! `DemoConfig::default()` reproduces the ranges of the classroom demos.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::{DemoError, DemoResult};
use crate::reactive::{Changeable, Control, Slider, SliderKind};

/// Top-level demo configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Pipe flow demo.
    #[validate(nested)]
    #[serde(default)]
    pub pipe: PipeConfig,

    /// Tank drainage demo.
    #[validate(nested)]
    #[serde(default)]
    pub tank: TankConfig,

    /// Elastic angle demo.
    #[validate(nested)]
    #[serde(default)]
    pub angle: AngleConfig,

    /// Addition demo.
    #[validate(nested)]
    #[serde(default)]
    pub addition: AdditionConfig,

    /// Animation pacing.
    #[validate(nested)]
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Drawing surface and number formatting.
    #[validate(nested)]
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> DemoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate_all(&self) -> DemoResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> DemoResult<()> {
        for (name, slider) in self.sliders() {
            slider.check(name)?;
        }
        if self.tank.holes.min < 1.0 {
            return Err(DemoError::config(format!(
                "tank.holes must allow at least one hole, got min {}",
                self.tank.holes.min
            )));
        }
        if self.tank.depth.min <= 0.0 {
            return Err(DemoError::config(format!(
                "tank.depth must stay positive, got min {}",
                self.tank.depth.min
            )));
        }
        Ok(())
    }

    /// Every slider with its dotted path, for validation and listing.
    #[must_use]
    pub fn sliders(&self) -> Vec<(&'static str, &SliderConfig)> {
        vec![
            ("pipe.u1", &self.pipe.u1),
            ("pipe.end1.diameter", &self.pipe.end1.diameter),
            ("pipe.end1.width", &self.pipe.end1.width),
            ("pipe.end1.height", &self.pipe.end1.height),
            ("pipe.end1.elevation", &self.pipe.end1.elevation),
            ("pipe.end2.diameter", &self.pipe.end2.diameter),
            ("pipe.end2.width", &self.pipe.end2.width),
            ("pipe.end2.height", &self.pipe.end2.height),
            ("pipe.end2.elevation", &self.pipe.end2.elevation),
            ("tank.flow", &self.tank.flow),
            ("tank.depth", &self.tank.depth),
            ("tank.holes", &self.tank.holes),
            ("tank.hole_diameter", &self.tank.hole_diameter),
            ("angle.mass", &self.angle.mass),
            ("angle.stiffness", &self.angle.stiffness),
            ("angle.initial_velocity", &self.angle.initial_velocity),
            ("addition.a", &self.addition.a),
            ("addition.b", &self.addition.b),
        ]
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            pipe: PipeConfig::default(),
            tank: TankConfig::default(),
            angle: AngleConfig::default(),
            addition: AdditionConfig::default(),
            animation: AnimationConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct DemoConfigBuilder {
    frame_interval_ms: Option<u64>,
    animations: Option<bool>,
    precision: Option<usize>,
    surface: Option<(u32, u32)>,
}

impl DemoConfigBuilder {
    /// Set the animation frame interval in milliseconds.
    #[must_use]
    pub const fn frame_interval_ms(mut self, ms: u64) -> Self {
        self.frame_interval_ms = Some(ms);
        self
    }

    /// Enable or disable background animations.
    #[must_use]
    pub const fn animations(mut self, enabled: bool) -> Self {
        self.animations = Some(enabled);
        self
    }

    /// Set the number of decimals shown in reports.
    #[must_use]
    pub const fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Set the drawing surface size in pixels.
    #[must_use]
    pub const fn surface(mut self, width: u32, height: u32) -> Self {
        self.surface = Some((width, height));
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DemoConfig {
        let mut config = DemoConfig::default();

        if let Some(ms) = self.frame_interval_ms {
            config.animation.frame_interval_ms = ms;
        }

        if let Some(enabled) = self.animations {
            config.animation.enabled = enabled;
        }

        if let Some(digits) = self.precision {
            config.display.precision = digits;
        }

        if let Some((width, height)) = self.surface {
            config.display.width = width;
            config.display.height = height;
        }

        config
    }
}

/// One slider: range, initial position, unit and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SliderConfig {
    /// Text shown next to the slider.
    #[validate(length(min = 1))]
    pub label: String,
    /// Unit of the nominal value.
    #[serde(default)]
    pub unit: String,
    /// Power of ten relating the nominal value to SI.
    #[validate(range(min = -12, max = 12))]
    #[serde(default)]
    pub scale_exponent: i32,
    /// Integer or float slider.
    #[serde(default = "default_kind")]
    pub kind: SliderKind,
    /// Initial position.
    pub initial: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step size.
    #[serde(default = "default_step")]
    pub step: f64,
}

const fn default_kind() -> SliderKind {
    SliderKind::Float
}

const fn default_step() -> f64 {
    0.1
}

impl SliderConfig {
    /// Float slider.
    #[must_use]
    pub fn float(label: &str, unit: &str, scale_exponent: i32, initial: f64, min: f64, max: f64) -> Self {
        Self {
            label: label.to_string(),
            unit: unit.to_string(),
            scale_exponent,
            kind: SliderKind::Float,
            initial,
            min,
            max,
            step: default_step(),
        }
    }

    /// Integer slider with unit step.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn int(label: &str, unit: &str, initial: i64, min: i64, max: i64) -> Self {
        Self {
            label: label.to_string(),
            unit: unit.to_string(),
            scale_exponent: 0,
            kind: SliderKind::Int,
            initial: initial as f64,
            min: min as f64,
            max: max as f64,
            step: 1.0,
        }
    }

    /// Same slider with a different step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Same slider starting at `initial`.
    #[must_use]
    pub const fn with_initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    fn check(&self, name: &str) -> DemoResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.initial.is_finite()) {
            return Err(DemoError::config(format!("{name}: bounds must be finite")));
        }
        if self.min > self.max {
            return Err(DemoError::config(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(DemoError::config(format!(
                "{name}: initial {} outside [{}, {}]",
                self.initial, self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(DemoError::config(format!(
                "{name}: step must be positive, got {}",
                self.step
            )));
        }
        Ok(())
    }

    /// Build the slider control described by this entry.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn control(&self) -> Control {
        match self.kind {
            SliderKind::Float => {
                Control::Slider(Slider::float(self.initial, self.min, self.max, self.step))
            }
            SliderKind::Int => Control::Slider(Slider::int(
                self.initial.round() as i64,
                self.min.round() as i64,
                self.max.round() as i64,
                self.step.round().max(1.0) as i64,
            )),
        }
    }

    /// Build a [`Changeable`] bound to this slider.
    #[must_use]
    pub fn build(&self, name: &str) -> Changeable {
        Changeable::new(
            name,
            self.label.clone(),
            self.control(),
            self.scale_exponent,
            self.unit.clone(),
        )
    }
}

/// One end of the pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PipeEndConfig {
    /// Diameter of a circular cross-section.
    #[validate(nested)]
    pub diameter: SliderConfig,
    /// Width of a rectangular cross-section.
    #[validate(nested)]
    pub width: SliderConfig,
    /// Height of a rectangular cross-section.
    #[validate(nested)]
    pub height: SliderConfig,
    /// Elevation of the pipe axis.
    #[validate(nested)]
    pub elevation: SliderConfig,
}

impl PipeEndConfig {
    fn with_size(size_cm: f64) -> Self {
        Self {
            diameter: SliderConfig::float("Diameter D =", "cm", -2, size_cm, 1.0, 100.0),
            width: SliderConfig::float("Width W =", "cm", -2, size_cm, 1.0, 100.0),
            height: SliderConfig::float("Height H =", "cm", -2, size_cm, 1.0, 100.0),
            elevation: SliderConfig::float("Elevation Y =", "m", 0, 0.0, -25.0, 25.0),
        }
    }
}

/// Pipe flow demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PipeConfig {
    /// Inlet velocity.
    #[validate(nested)]
    pub u1: SliderConfig,
    /// Inlet end.
    #[validate(nested)]
    pub end1: PipeEndConfig,
    /// Outlet end.
    #[validate(nested)]
    pub end2: PipeEndConfig,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            u1: SliderConfig::float("Velocity U1 =", "m/s", 0, 10.0, 0.5, 30.0),
            end1: PipeEndConfig::with_size(20.0),
            end2: PipeEndConfig::with_size(10.0),
        }
    }
}

/// Tank drainage demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TankConfig {
    /// Inflow.
    #[validate(nested)]
    pub flow: SliderConfig,
    /// Height of the tank walls.
    #[validate(nested)]
    pub depth: SliderConfig,
    /// Number of holes in the bottom.
    #[validate(nested)]
    pub holes: SliderConfig,
    /// Diameter of every hole.
    #[validate(nested)]
    pub hole_diameter: SliderConfig,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            flow: SliderConfig::float("Water flow Q =", "m³/s", 0, 0.06, 0.01, 1.0).with_step(0.01),
            depth: SliderConfig::float("Tank depth =", "m", 0, 1.0, 0.5, 5.0),
            holes: SliderConfig::int("Nr of holes:", "", 25, 5, 50),
            hole_diameter: SliderConfig::float("Diameter d =", "cm", -2, 2.0, 0.5, 10.0),
        }
    }
}

/// Elastic angle demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AngleConfig {
    /// Arm mass.
    #[validate(nested)]
    pub mass: SliderConfig,
    /// Spring stiffness.
    #[validate(nested)]
    pub stiffness: SliderConfig,
    /// Initial angular velocity.
    #[validate(nested)]
    pub initial_velocity: SliderConfig,
}

impl Default for AngleConfig {
    fn default() -> Self {
        Self {
            mass: SliderConfig::float("Mass m =", "kg", 0, 9.0, 1.0, 50.0),
            stiffness: SliderConfig::float("Spring stiffness k =", "kN/m", 3, 3.0, 1.0, 50.0),
            initial_velocity: SliderConfig::float(
                "Initial angular velocity φ0 =",
                "rad/s",
                0,
                0.2,
                0.1,
                10.0,
            ),
        }
    }
}

/// Addition demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AdditionConfig {
    /// First summand.
    #[validate(nested)]
    pub a: SliderConfig,
    /// Second summand.
    #[validate(nested)]
    pub b: SliderConfig,
}

impl Default for AdditionConfig {
    fn default() -> Self {
        Self {
            a: SliderConfig::int("First number", "m", 0, 0, 10),
            b: SliderConfig::int("Second number", "m", 0, 0, 10),
        }
    }
}

/// Animation pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Run animations on a background thread. When disabled, animated
    /// quantities jump to their target immediately.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Time between frames.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Fraction of the remaining distance covered per water-level frame.
    #[validate(range(min = 0.001, max = 1.0))]
    #[serde(default = "default_lerp_rate")]
    pub lerp_rate: f64,
    /// Distance (m) at which the water level snaps to its target.
    #[validate(range(min = 0.000_001, max = 1.0))]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

const fn default_true() -> bool {
    true
}

const fn default_frame_interval() -> u64 {
    20
}

const fn default_lerp_rate() -> f64 {
    0.1
}

const fn default_tolerance() -> f64 {
    0.001
}

impl AnimationConfig {
    /// Frame interval as a [`Duration`].
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frame_interval_ms: default_frame_interval(),
            lerp_rate: default_lerp_rate(),
            tolerance: default_tolerance(),
        }
    }
}

/// Drawing surface and number formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Surface width in pixels.
    #[validate(range(min = 100, max = 4096))]
    #[serde(default = "default_width")]
    pub width: u32,
    /// Surface height in pixels.
    #[validate(range(min = 100, max = 4096))]
    #[serde(default = "default_height")]
    pub height: u32,
    /// Decimal places in reports.
    #[validate(range(max = 12))]
    #[serde(default = "default_precision")]
    pub precision: usize,
}

const fn default_width() -> u32 {
    600
}

const fn default_height() -> u32 {
    300
}

const fn default_precision() -> usize {
    3
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            precision: default_precision(),
        }
    }
}
