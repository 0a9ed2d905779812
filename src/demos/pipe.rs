//! Pipe flow between two cross-sections.
//!
//! # Governing Equations
//!
//! ```text
//! Continuity:  Q₁ = A₁·u₁ = A₂·u₂ = Q₂
//! Bernoulli:   p₁ − p₂ = ρ/2·(u₂² − u₁²) + ρ·g·(z₂ − z₁)
//! ```
//!
//! Each end is either circular (diameter) or rectangular (width × height).
//! The shape toggle decides which size sliders are shown; hidden sliders
//! keep their value and subscribers.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{Model, Outcome, Report};
use crate::config::{DemoConfig, PipeEndConfig};
use crate::domains::{fluid, WATER_DENSITY};
use crate::error::{DemoError, PhysicsError};
use crate::reactive::{
    Alignment, ChangeEvent, Changeable, ChangeableContainer, Orientation, Variable,
};
use crate::renderers::{Color, DisplaySurface, Paint};

/// Cross-section shape of a pipe end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Rectangle,
}

impl Shape {
    /// Toggle options in display order.
    pub const OPTIONS: [&'static str; 2] = ["Circle", "Rectangle"];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shape {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Circle" => Ok(Self::Circle),
            "Rectangle" => Ok(Self::Rectangle),
            other => Err(DemoError::UnknownOption {
                name: "shape".to_string(),
                option: other.to_string(),
            }),
        }
    }
}

/// Controls of one pipe end.
#[derive(Debug, Clone)]
struct PipeEnd {
    header: Changeable,
    shape: Option<Changeable>,
    diameter: Changeable,
    width: Changeable,
    height: Changeable,
    elevation: Option<Changeable>,
}

impl PipeEnd {
    fn new(index: u8, config: &PipeEndConfig, advanced: bool) -> Self {
        let end = Self {
            header: Changeable::spacer(format!("end{index}_header"), format!("End {index}")),
            shape: advanced.then(|| {
                Changeable::toggle(format!("end{index}_shape"), "Shape:", &Shape::OPTIONS)
            }),
            diameter: config.diameter.build(&format!("d{index}")),
            width: config.width.build(&format!("w{index}")),
            height: config.height.build(&format!("h{index}")),
            elevation: advanced.then(|| config.elevation.build(&format!("y{index}"))),
        };
        end.sync();
        end
    }

    fn shape(&self) -> Shape {
        self.shape
            .as_ref()
            .and_then(Changeable::selected)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Shape::Circle)
    }

    /// Show the size sliders of the selected shape only.
    fn sync(&self) {
        let circle = self.shape() == Shape::Circle;
        self.diameter.set_active(circle);
        self.width.set_active(!circle);
        self.height.set_active(!circle);
    }

    fn area(&self) -> Result<f64, PhysicsError> {
        match self.shape() {
            Shape::Circle => fluid::circle_area(self.diameter.real()),
            Shape::Rectangle => fluid::rect_area(self.width.real(), self.height.real()),
        }
    }

    /// Visible height of the cross-section in a side view (m).
    fn side_height(&self) -> f64 {
        match self.shape() {
            Shape::Circle => self.diameter.real(),
            Shape::Rectangle => self.height.real(),
        }
    }

    fn elevation(&self) -> f64 {
        self.elevation.as_ref().map_or(0.0, Changeable::real)
    }

    fn members(&self) -> Vec<Changeable> {
        let mut members = vec![self.header.clone()];
        members.extend(self.shape.iter().cloned());
        members.extend([self.diameter.clone(), self.width.clone(), self.height.clone()]);
        members.extend(self.elevation.iter().cloned());
        members
    }
}

/// Derived quantities of a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PipeState {
    a1: f64,
    a2: f64,
    u1: f64,
    u2: f64,
    q1: f64,
    q2: f64,
    dp: f64,
}

/// Flow through a pipe with two (possibly different) ends.
#[derive(Debug)]
pub struct PipeModel {
    end1: PipeEnd,
    end2: PipeEnd,
    u1: Changeable,
    containers: Vec<ChangeableContainer>,
    precision: usize,
    advanced: bool,
    state: Option<PipeState>,
}

impl PipeModel {
    /// Pipe with shape toggles and elevation sliders on both ends.
    #[must_use]
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::build(config, true)
    }

    /// Circular, level pipe: diameters and inlet velocity only.
    #[must_use]
    pub fn simple(config: &DemoConfig) -> Self {
        Self::build(config, false)
    }

    fn build(config: &DemoConfig, advanced: bool) -> Self {
        let end1 = PipeEnd::new(1, &config.pipe.end1, advanced);
        let end2 = PipeEnd::new(2, &config.pipe.end2, advanced);
        let u1 = config.pipe.u1.build("u1");

        let containers = vec![
            ChangeableContainer::with_layout(end1.members(), Orientation::Vertical, Alignment::Start),
            ChangeableContainer::with_layout(end2.members(), Orientation::Vertical, Alignment::Start),
            ChangeableContainer::new(vec![u1.clone()]),
        ];

        let mut model = Self {
            end1,
            end2,
            u1,
            containers,
            precision: config.display.precision,
            advanced,
            state: None,
        };
        model.state = model.derive().ok();
        model
    }

    /// Shape currently selected for end 1 and end 2.
    #[must_use]
    pub fn shapes(&self) -> (Shape, Shape) {
        (self.end1.shape(), self.end2.shape())
    }

    /// Whether the model offers shape and elevation controls.
    #[must_use]
    pub const fn is_advanced(&self) -> bool {
        self.advanced
    }

    /// Outlet velocity of the last update, if the configuration was valid.
    #[must_use]
    pub fn outlet_velocity(&self) -> Option<f64> {
        self.state.map(|s| s.u2)
    }

    fn derive(&self) -> Result<PipeState, String> {
        let a1 = self.end1.area().map_err(|e| format!("End 1: {e}"))?;
        let a2 = self.end2.area().map_err(|e| format!("End 2: {e}"))?;
        let u1 = self.u1.real();
        let u2 = fluid::continuity_velocity(a1, a2, u1).map_err(|e| e.to_string())?;
        let dp = fluid::bernoulli_pressure_drop(
            u1,
            u2,
            self.end1.elevation(),
            self.end2.elevation(),
            WATER_DENSITY,
        )
        .map_err(|e| e.to_string())?;
        Ok(PipeState {
            a1,
            a2,
            u1,
            u2,
            q1: fluid::volumetric_flow(a1, u1),
            q2: fluid::volumetric_flow(a2, u2),
            dp,
        })
    }
}

impl Model for PipeModel {
    fn name(&self) -> &'static str {
        "pipe"
    }

    fn containers(&self) -> &[ChangeableContainer] {
        &self.containers
    }

    fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
        &mut self.containers
    }

    fn calculate(&self) -> Outcome {
        let state = match self.derive() {
            Ok(state) => state,
            Err(reason) => return Outcome::invalid(reason),
        };
        let mut report = Report::new("Pipe flow", self.precision)
            .quantity("Inlet area", "A1", Variable::si(state.a1, "m²"))
            .quantity("Outlet area", "A2", Variable::si(state.a2, "m²"))
            .quantity("Inlet velocity", "u1", Variable::si(state.u1, "m/s"))
            .quantity("Outlet velocity", "u2", Variable::si(state.u2, "m/s"))
            .quantity("Inlet flow", "Q1", Variable::si(state.q1, "m³/s"))
            .quantity("Outlet flow", "Q2", Variable::si(state.q2, "m³/s"));
        if self.advanced {
            report = report.quantity("Pressure drop", "p1 - p2", Variable::si(state.dp, "Pa"));
        }
        Outcome::Ok(report)
    }

    fn update(&mut self, change: Option<&ChangeEvent>) {
        self.state = self.derive().ok();
        debug!(
            change = ?change.map(|c| &c.name),
            u2 = ?self.state.map(|s| s.u2),
            "pipe updated"
        );
    }

    fn sync_inputs(&mut self) {
        self.end1.sync();
        self.end2.sync();
    }

    fn draw(&self, surface: &mut dyn DisplaySurface) {
        let (width, height) = surface.size();
        let x1 = width * 0.15;
        let x2 = width * 0.85;

        // Larger end spans half the surface height.
        let tallest = self.end1.side_height().max(self.end2.side_height()).max(1e-6);
        let px_per_m = height * 0.5 / tallest;
        let h1 = self.end1.side_height() * px_per_m;
        let h2 = self.end2.side_height() * px_per_m;

        // Elevation range ±25 m maps to ±20 % of the height.
        let center = |z: f64| height * 0.5 - z / 25.0 * height * 0.2;
        let c1 = center(self.end1.elevation());
        let c2 = center(self.end2.elevation());

        surface.clear();
        surface.set_stroke(Color::BLACK);
        surface.set_line_width(1.0);
        surface.draw_line(0.0, 0.0, width, 0.0);
        surface.draw_line(0.0, height - 1.0, width, height - 1.0);

        surface.set_fill(Color::PIPE_FILL);
        surface.set_stroke(Color::PIPE_WALL);
        surface.draw_polygon(
            &[
                (x1, c1 - h1 / 2.0),
                (x2, c2 - h2 / 2.0),
                (x2, c2 + h2 / 2.0),
                (x1, c1 + h1 / 2.0),
            ],
            Paint::FillAndStroke,
        );

        for (end, x, c, h, fill) in [
            (&self.end1, x1, c1, h1, Color::PIPE_INLET),
            (&self.end2, x2, c2, h2, Color::PIPE_OUTLET),
        ] {
            surface.set_fill(fill);
            match end.shape() {
                Shape::Circle => surface.draw_ellipse(x, c, h / 4.0, h / 2.0, Paint::FillAndStroke),
                Shape::Rectangle => {
                    surface.draw_rect(x - h / 8.0, c - h / 2.0, h / 4.0, h, Paint::FillAndStroke);
                }
            }
        }

        if (c1 - c2).abs() > f64::EPSILON {
            surface.set_stroke(Color::GRAY);
            surface.draw_line(0.0, c1, width, c1);
            surface.draw_line(0.0, c2, width, c2);
            surface.set_stroke(Color::BLACK);
            let xi = x2 + h2 / 4.0 + 25.0;
            surface.draw_line(xi, c1, xi, c2);
            surface.set_fill(Color::BLACK);
            surface.draw_text(xi + 10.0, (c1 + c2) / 2.0, "Δh");
        }

        surface.set_fill(Color::BLACK);
        surface.draw_text(x1 - 10.0, height - 10.0, "A1");
        surface.draw_text(x2 - 10.0, height - 10.0, "A2");
        if let Some(state) = self.state {
            let p = self.precision;
            surface.draw_text(x1 + 10.0, 20.0, &format!("u1 = {:.p$} m/s", state.u1));
            surface.draw_text(x2 - 120.0, 20.0, &format!("u2 = {:.p$} m/s", state.u2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::ControlInput;
    use crate::renderers::{CommandRecorder, RenderCommand};

    fn set(model: &PipeModel, name: &str, input: ControlInput) {
        model
            .find(name)
            .expect("known control")
            .on_control_changed(&input)
            .expect("accepted input");
    }

    fn pipe() -> PipeModel {
        let model = PipeModel::from_config(&DemoConfig::default());
        set(&model, "u1", ControlInput::Float(2.0));
        model
    }

    #[test]
    fn test_circular_continuity_scenario() {
        // d1 = 20 cm, d2 = 10 cm (defaults), u1 = 2 m/s
        let outcome = pipe().calculate();
        let u2 = outcome.get("u2").expect("valid").real();
        let q1 = outcome.get("Q1").expect("valid").real();
        let q2 = outcome.get("Q2").expect("valid").real();
        assert!((u2 - 8.0).abs() < 1e-9);
        assert!((q1 - q2).abs() < 1e-12);
    }

    #[test]
    fn test_level_pipe_pressure_drop() {
        let outcome = pipe().calculate();
        let dp = outcome.get("p1 - p2").expect("valid").real();
        assert!((dp - 0.5 * 1000.0 * (64.0 - 4.0)).abs() < 1e-6);
    }

    #[test]
    fn test_rectangular_end_uses_width_and_height() {
        let model = pipe();
        set(&model, "end2_shape", ControlInput::Select("Rectangle".to_string()));
        set(&model, "w2", ControlInput::Float(10.0));
        set(&model, "h2", ControlInput::Float(5.0));

        let outcome = model.calculate();
        let a2 = outcome.get("A2").expect("valid").real();
        assert!((a2 - 0.005).abs() < 1e-12);
        assert_eq!(model.shapes(), (Shape::Circle, Shape::Rectangle));
    }

    #[test]
    fn test_shape_toggle_switches_active_sliders() {
        let mut model = pipe();
        assert!(model.find("d1").expect("d1").is_active());
        assert!(!model.find("w1").expect("w1").is_active());

        set(&model, "end1_shape", ControlInput::Select("Rectangle".to_string()));
        model.sync_inputs();

        assert!(!model.find("d1").expect("d1").is_active());
        assert!(model.find("w1").expect("w1").is_active());
        assert!(model.find("h1").expect("h1").is_active());
    }

    #[test]
    fn test_zero_area_is_invalid() {
        let mut config = DemoConfig::default();
        config.pipe.end2.diameter.min = 0.0;
        let model = PipeModel::from_config(&config);
        set(&model, "d2", ControlInput::Float(0.0));

        match model.calculate() {
            Outcome::Invalid { reason } => assert!(reason.starts_with("End 2")),
            Outcome::Ok(_) => panic!("zero outlet area must be invalid"),
        }
    }

    #[test]
    fn test_elevation_changes_pressure_drop() {
        let model = pipe();
        set(&model, "y2", ControlInput::Float(2.0));
        let dp = model.calculate().get("p1 - p2").expect("valid").real();
        let expected = 0.5 * 1000.0 * (64.0 - 4.0) + 1000.0 * 9.81 * 2.0;
        assert!((dp - expected).abs() < 1e-6);
    }

    #[test]
    fn test_simple_preset() {
        let model = PipeModel::simple(&DemoConfig::default());
        assert!(!model.is_advanced());
        assert!(model.find("end1_shape").is_none());
        assert!(model.find("y1").is_none());
        assert!(model.calculate().get("p1 - p2").is_none());
        assert!(model.calculate().get("u2").is_some());
    }

    #[test]
    fn test_update_caches_outlet_velocity() {
        let mut model = pipe();
        model.update(None);
        assert!((model.outlet_velocity().expect("valid") - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_sections() {
        let mut model = pipe();
        model.update(None);
        let mut rec = CommandRecorder::default();
        model.draw(&mut rec);

        assert_eq!(rec.clears(), 1);
        assert_eq!(
            rec.count(|c| matches!(c, RenderCommand::Ellipse { .. })),
            2
        );
        assert!(rec.texts().iter().any(|t| t.starts_with("u2 = 8.000")));

        set(&model, "end1_shape", ControlInput::Select("Rectangle".to_string()));
        model.draw(&mut rec);
        assert_eq!(rec.count(|c| matches!(c, RenderCommand::Rect { .. })), 1);
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!("Circle".parse::<Shape>().ok(), Some(Shape::Circle));
        assert!("Hexagon".parse::<Shape>().is_err());
    }
}
