//! Elastically supported rigid angle.
//!
//! # Governing Equations
//!
//! ```text
//! ω₀   = √(2k / ((5/3)·m))
//! f₀   = ω₀ / 2π,   T = 2π / ω₀
//! φ(t) = (φ̇₀ / ω₀) · sin(ω₀ t)
//! ```
//!
//! `update` restarts an endless oscillation animation; the sketch shows the
//! angle rotated by the most recent frame, exaggerated so that small
//! amplitudes remain visible.

use std::f64::consts::PI;
use std::time::Duration;

use tracing::{debug, warn};

use super::{Model, Outcome, Report};
use crate::config::{AnimationConfig, DemoConfig};
use crate::domains::vibration;
use crate::engine::animation::{AnimationTask, Animator};
use crate::reactive::{ChangeEvent, Changeable, ChangeableContainer, Variable};
use crate::renderers::{Color, DisplaySurface, Paint};

/// Largest rotation drawn, reached at the response amplitude (rad).
const MAX_DRAWN_ANGLE: f64 = PI / 12.0;

/// One animation frame: time within the period and angle at that time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleFrame {
    /// Time since release, wrapped to one period (s).
    pub t: f64,
    /// Angular displacement (rad).
    pub phi: f64,
}

/// Endless free oscillation.
#[derive(Debug, Clone)]
pub struct Oscillation {
    phi0: f64,
    w0: f64,
    period: f64,
    t: f64,
}

impl Oscillation {
    /// Oscillation released with angular velocity `phi0` at frequency `w0`.
    ///
    /// # Errors
    ///
    /// Returns the physics error if `w0` is not positive.
    pub fn new(phi0: f64, w0: f64) -> Result<Self, crate::error::PhysicsError> {
        Ok(Self {
            phi0,
            w0,
            period: vibration::period(w0)?,
            t: 0.0,
        })
    }
}

impl Animator for Oscillation {
    type Frame = AngleFrame;

    fn next_frame(&mut self, dt: Duration) -> Option<AngleFrame> {
        self.t = (self.t + dt.as_secs_f64()) % self.period;
        let phi = vibration::angle_at(self.phi0, self.w0, self.t).ok()?;
        Some(AngleFrame { t: self.t, phi })
    }
}

/// Rigid angle on two springs.
#[derive(Debug)]
pub struct AngleModel {
    mass: Changeable,
    stiffness: Changeable,
    initial_velocity: Changeable,
    containers: Vec<ChangeableContainer>,
    animation: AnimationConfig,
    frame: AngleFrame,
    task: Option<AnimationTask<AngleFrame>>,
    precision: usize,
}

impl AngleModel {
    #[must_use]
    pub fn from_config(config: &DemoConfig) -> Self {
        let mass = config.angle.mass.build("m");
        let stiffness = config.angle.stiffness.build("k");
        let initial_velocity = config.angle.initial_velocity.build("phi0");
        Self {
            containers: vec![ChangeableContainer::new(vec![
                mass.clone(),
                stiffness.clone(),
                initial_velocity.clone(),
            ])],
            mass,
            stiffness,
            initial_velocity,
            animation: config.animation.clone(),
            frame: AngleFrame::default(),
            task: None,
            precision: config.display.precision,
        }
    }

    /// Natural circular frequency for the current parameters.
    ///
    /// # Errors
    ///
    /// Returns the physics error for non-positive mass or stiffness.
    pub fn circular_frequency(&self) -> Result<f64, crate::error::PhysicsError> {
        vibration::natural_frequency(self.mass.real(), self.stiffness.real())
    }

    /// Angular displacement at time `t` (s), if the parameters are valid.
    #[must_use]
    pub fn angle_at(&self, t: f64) -> Option<Variable> {
        let w0 = self.circular_frequency().ok()?;
        vibration::angle_at(self.initial_velocity.real(), w0, t)
            .ok()
            .map(|phi| Variable::si(phi, "rad"))
    }

    /// Frame currently shown.
    #[must_use]
    pub const fn frame(&self) -> AngleFrame {
        self.frame
    }

    fn restart(&mut self) {
        self.stop_animation();
        self.frame = AngleFrame::default();
        if !self.animation.enabled {
            return;
        }
        let oscillation = match self
            .circular_frequency()
            .and_then(|w0| Oscillation::new(self.initial_velocity.real(), w0))
        {
            Ok(oscillation) => oscillation,
            Err(e) => {
                debug!(error = %e, "oscillation not started");
                return;
            }
        };
        match AnimationTask::spawn("oscillation", oscillation, self.animation.frame_interval()) {
            Ok(task) => self.task = Some(task),
            Err(e) => warn!(error = %e, "oscillation animation unavailable"),
        }
    }

    fn drawn_angle(&self) -> f64 {
        let amplitude = self
            .circular_frequency()
            .and_then(|w0| vibration::amplitude(self.initial_velocity.real(), w0))
            .unwrap_or(0.0);
        if amplitude > 0.0 {
            self.frame.phi / amplitude * MAX_DRAWN_ANGLE
        } else {
            0.0
        }
    }
}

fn rotate((cx, cy): (f64, f64), (dx, dy): (f64, f64), theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (cx + dx * c - dy * s, cy + dx * s + dy * c)
}

/// Zig-zag spring from `top` straight down to `bottom_y`.
fn spring(surface: &mut dyn DisplaySurface, top: (f64, f64), bottom_y: f64, coils: u32, offset: f64) {
    let (x, y0) = top;
    let lead = (bottom_y - y0) * 0.15;
    let coil_height = (bottom_y - y0 - 2.0 * lead) / f64::from(coils);
    let mut points = vec![(x, y0), (x, y0 + lead)];
    for i in 0..coils {
        let side = if i % 2 == 0 { -offset } else { offset };
        points.push((x + side, y0 + lead + coil_height * (f64::from(i) + 0.5)));
    }
    points.push((x, bottom_y - lead));
    points.push((x, bottom_y));
    surface.draw_polyline(&points);
}

/// Ground line with hatching below it.
fn hatched_ground(surface: &mut dyn DisplaySurface, x0: f64, x1: f64, y: f64) {
    surface.draw_line(x0, y, x1, y);
    let mut x = x0;
    while x < x1 - 4.0 {
        surface.draw_line(x, y + 6.0, x + 4.0, y);
        x += 4.0;
    }
}

impl Model for AngleModel {
    fn name(&self) -> &'static str {
        "angle"
    }

    fn containers(&self) -> &[ChangeableContainer] {
        &self.containers
    }

    fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
        &mut self.containers
    }

    fn calculate(&self) -> Outcome {
        let w0 = match self.circular_frequency() {
            Ok(w0) => w0,
            Err(e) => return Outcome::invalid(e.to_string()),
        };
        let period = match vibration::period(w0) {
            Ok(t) => t,
            Err(e) => return Outcome::invalid(e.to_string()),
        };
        let phi0 = self.initial_velocity.real();
        let p = self.precision;
        Outcome::Ok(
            Report::new("Elastically supported rigid angle", p)
                .quantity("Mass", "m", self.mass.variable())
                .quantity("Spring stiffness", "k", self.stiffness.variable())
                .quantity("Initial angular velocity", "φ0", self.initial_velocity.variable())
                .quantity("Natural circular frequency", "w0", Variable::si(w0, "rad/s"))
                .quantity("Period", "T", Variable::si(period, "s"))
                .quantity("Natural frequency", "f0", Variable::si(vibration::frequency(w0), "Hz"))
                .expression(
                    "Response",
                    "φ(t)",
                    format!("{:.p$} · sin({:.p$}·t)", phi0 / w0, w0),
                ),
        )
    }

    fn update(&mut self, change: Option<&ChangeEvent>) {
        debug!(change = ?change.map(|c| &c.name), "angle updated, restarting oscillation");
        self.restart();
    }

    fn draw(&self, surface: &mut dyn DisplaySurface) {
        let (width, height) = surface.size();
        let pivot = (width / 2.0, height * 0.55);
        let rod = height * 0.35;
        let arm = width * 0.2;
        let ground = height - 20.0;
        let theta = self.drawn_angle();

        surface.clear();
        surface.set_stroke(Color::BLACK);
        surface.set_line_width(1.0);

        // Fixed parts: support and ground
        surface.set_fill(Color::BLACK);
        surface.draw_polygon(
            &[
                pivot,
                (pivot.0 - 8.0, pivot.1 + 14.0),
                (pivot.0 + 8.0, pivot.1 + 14.0),
            ],
            Paint::Fill,
        );
        hatched_ground(surface, pivot.0 - 15.0, pivot.0 + 15.0, pivot.1 + 14.0);
        hatched_ground(surface, pivot.0 - arm - 20.0, pivot.0 + arm + 20.0, ground);

        // Rotating angle: vertical rod with the mass, horizontal arm on springs
        let top = rotate(pivot, (0.0, -rod), theta);
        let left = rotate(pivot, (-arm, 0.0), theta);
        let right = rotate(pivot, (arm, 0.0), theta);
        surface.set_line_width(3.0);
        surface.draw_line(pivot.0, pivot.1, top.0, top.1);
        surface.draw_line(left.0, left.1, right.0, right.1);
        surface.set_line_width(1.0);

        surface.set_fill(Color::LIGHT_GRAY);
        surface.draw_ellipse(top.0, top.1, 12.0, 12.0, Paint::FillAndStroke);
        surface.set_fill(Color::BLACK);
        surface.draw_text(top.0 - 4.5, top.1 + 4.0, "m");

        for end in [left, right] {
            spring(surface, end, ground, 7, 5.0);
        }

        surface.set_fill(Color::WHITE);
        surface.draw_arc(pivot.0, pivot.1, 5.0, 0.0, 2.0 * PI - 1e-6, Paint::FillAndStroke);

        surface.set_fill(Color::BLACK);
        surface.draw_text(
            10.0,
            20.0,
            &format!(
                "t = {:.2} s   φ = {:.p$} rad",
                self.frame.t,
                self.frame.phi,
                p = self.precision
            ),
        );
    }

    fn tick(&mut self) -> bool {
        match self.task.as_ref().and_then(AnimationTask::latest) {
            Some(frame) => {
                self.frame = frame;
                true
            }
            None => false,
        }
    }

    fn is_animating(&self) -> bool {
        self.task.is_some()
    }

    fn stop_animation(&mut self) {
        if let Some(task) = self.task.take() {
            task.stop();
        }
    }
}
