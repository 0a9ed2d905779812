//! Tank drainage through holes in the bottom.
//!
//! # Governing Equations
//!
//! Water flows in at `Q` and drains through `n` equal holes of diameter `d`.
//! `n` and `d` are read from the hole list, which the count and diameter
//! sliders resize and rewrite. The steady water depth balances inflow and
//! Torricelli outflow:
//!
//! ```text
//! h = 1/(2g) · (4Q / (n·π·d²))²
//! ```
//!
//! The sketch does not jump to a new depth: every update retargets a
//! water-level animation that interpolates from the level currently shown.

use std::time::Duration;

use tracing::{debug, warn};

use super::{Model, Outcome, Report};
use crate::config::{AnimationConfig, DemoConfig};
use crate::domains::{fluid, lerp};
use crate::engine::animation::{AnimationTask, Animator};
use crate::reactive::{ChangeEvent, Changeable, ChangeableContainer, Variable};
use crate::renderers::{Color, DisplaySurface, Paint};

/// A hole in the tank bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    /// Diameter (m).
    pub diameter: f64,
}

/// Interpolates the shown water level towards a target depth.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterLevelLerp {
    level: f64,
    target: f64,
    rate: f64,
    tolerance: f64,
    done: bool,
}

impl WaterLevelLerp {
    #[must_use]
    pub const fn new(level: f64, target: f64, rate: f64, tolerance: f64) -> Self {
        Self {
            level,
            target,
            rate,
            tolerance,
            done: false,
        }
    }
}

impl Animator for WaterLevelLerp {
    type Frame = f64;

    fn next_frame(&mut self, _dt: Duration) -> Option<f64> {
        if self.done {
            return None;
        }
        self.level = lerp(self.level, self.target, self.rate);
        if (self.target - self.level).abs() <= self.tolerance {
            self.level = self.target;
            self.done = true;
        }
        Some(self.level)
    }
}

/// Tank with a perforated bottom.
#[derive(Debug)]
pub struct TankModel {
    flow: Changeable,
    depth: Changeable,
    hole_count: Changeable,
    hole_diameter: Changeable,
    containers: Vec<ChangeableContainer>,
    holes: Vec<Hole>,
    animation: AnimationConfig,
    level: f64,
    task: Option<AnimationTask<f64>>,
    precision: usize,
}

impl TankModel {
    #[must_use]
    pub fn from_config(config: &DemoConfig) -> Self {
        let flow = config.tank.flow.build("q");
        let depth = config.tank.depth.build("depth");
        let hole_count = config.tank.holes.build("holes");
        let hole_diameter = config.tank.hole_diameter.build("d");

        let containers = vec![
            ChangeableContainer::new(vec![flow.clone(), depth.clone()]),
            ChangeableContainer::new(vec![hole_count.clone(), hole_diameter.clone()]),
        ];

        let mut model = Self {
            flow,
            depth,
            hole_count,
            hole_diameter,
            containers,
            holes: Vec::new(),
            animation: config.animation.clone(),
            level: 0.0,
            task: None,
            precision: config.display.precision,
        };
        model.sync_holes();
        model.level = model.steady_depth().unwrap_or(0.0);
        model
    }

    /// Holes in the bottom.
    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Add a hole with the diameter currently selected on the slider.
    pub fn add_hole(&mut self) {
        self.holes.push(Hole {
            diameter: self.hole_diameter.real(),
        });
    }

    /// Remove the most recently added hole.
    pub fn pop_hole(&mut self) -> Option<Hole> {
        self.holes.pop()
    }

    /// Remove the hole at `index`.
    pub fn remove_hole(&mut self, index: usize) -> Option<Hole> {
        (index < self.holes.len()).then(|| self.holes.remove(index))
    }

    /// Set the diameter (m) of every hole.
    pub fn set_diameter(&mut self, diameter: f64) {
        for hole in &mut self.holes {
            hole.diameter = diameter;
        }
    }

    /// Set the diameter (m) of a single hole. Returns `false` if out of range.
    pub fn set_hole_diameter(&mut self, index: usize, diameter: f64) -> bool {
        self.holes.get_mut(index).map_or(false, |hole| {
            hole.diameter = diameter;
            true
        })
    }

    /// Whether all holes share one diameter.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn holes_equal(&self) -> bool {
        self.holes
            .first()
            .map_or(true, |first| self.holes.iter().all(|h| h.diameter == first.diameter))
    }

    /// Water level currently shown (m).
    #[must_use]
    pub const fn displayed_level(&self) -> f64 {
        self.level
    }

    /// Block until a running level animation reaches its target.
    pub fn settle(&mut self) {
        if let Some(task) = self.task.take() {
            if let Some(level) = task.wait().last() {
                self.level = *level;
            }
        }
    }

    /// Resize the hole list to the count slider and apply the diameter slider.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_holes(&mut self) {
        let wanted = self.hole_count.value().round().max(0.0) as usize;
        while self.holes.len() < wanted {
            self.add_hole();
        }
        while self.holes.len() > wanted {
            self.pop_hole();
        }
        self.set_diameter(self.hole_diameter.real());
    }

    /// Common diameter (m) of the holes, if there are any and they agree.
    fn common_diameter(&self) -> Result<f64, String> {
        let first = self.holes.first().ok_or_else(|| "tank has no holes".to_string())?;
        if !self.holes_equal() {
            return Err("holes must have equal diameters".to_string());
        }
        Ok(first.diameter)
    }

    fn steady_depth(&self) -> Result<f64, String> {
        let d = self.common_diameter()?;
        let n = u32::try_from(self.holes.len()).map_err(|e| e.to_string())?;
        fluid::orifice_depth(self.flow.real(), n, d).map_err(|e| e.to_string())
    }

    fn retarget(&mut self, target: f64) {
        self.stop_animation();
        if !self.animation.enabled {
            self.level = target;
            return;
        }
        let animator = WaterLevelLerp::new(
            self.level,
            target,
            self.animation.lerp_rate,
            self.animation.tolerance,
        );
        match AnimationTask::spawn("water-level", animator, self.animation.frame_interval()) {
            Ok(task) => self.task = Some(task),
            Err(e) => {
                warn!(error = %e, "water level animation unavailable");
                self.level = target;
            }
        }
    }

    /// X-centres of the holes drawn below a tank spanning `[x0, x0 + width]`.
    ///
    /// Holes spread outwards from the middle, alternating sides, until the
    /// count is exhausted or the walls are reached.
    fn hole_positions(&self, x0: f64, width: f64, spacing: f64) -> Vec<f64> {
        let mid = x0 + width / 2.0;
        let mut remaining = self.holes.len();
        let mut xs = Vec::new();
        if remaining == 0 {
            return xs;
        }
        xs.push(mid);
        remaining -= 1;
        let mut i = 1.0;
        while remaining > 0 {
            let (left, right) = (mid - spacing * i, mid + spacing * i);
            if left < x0 || right > x0 + width {
                break;
            }
            xs.push(left);
            remaining -= 1;
            if remaining > 0 {
                xs.push(right);
                remaining -= 1;
            }
            i += 1.0;
        }
        xs
    }
}

impl Model for TankModel {
    fn name(&self) -> &'static str {
        "tank"
    }

    fn containers(&self) -> &[ChangeableContainer] {
        &self.containers
    }

    fn containers_mut(&mut self) -> &mut [ChangeableContainer] {
        &mut self.containers
    }

    fn calculate(&self) -> Outcome {
        let h = match self.steady_depth() {
            Ok(h) => h,
            Err(reason) => return Outcome::invalid(reason),
        };
        let d = self.holes.first().map_or(0.0, |hole| hole.diameter);
        let tank_depth = self.depth.real();
        #[allow(clippy::cast_precision_loss)]
        let n = self.holes.len() as f64;
        let slider_d = self.hole_diameter.variable();
        let mut report = Report::new("Tank drainage", self.precision)
            .quantity("Water flow", "Q", self.flow.variable())
            .quantity("Number of holes", "n", self.hole_count.variable().with_value(n))
            .quantity(
                "Hole diameter",
                "d",
                Variable::si(d, "m").scaled_to(slider_d.scale_exponent(), slider_d.unit()),
            )
            .quantity("Tank depth", "H", self.depth.variable())
            .quantity("Water depth", "h", Variable::si(h, "m"));
        if h > tank_depth {
            report = report.note("OVERFLOW!");
        }
        Outcome::Ok(report)
    }

    fn update(&mut self, change: Option<&ChangeEvent>) {
        // Hole edits made through the list survive changes of the other sliders
        if change.map_or(true, |c| c.name == "holes" || c.name == "d") {
            self.sync_holes();
        }
        match self.steady_depth() {
            Ok(h) => {
                if h > self.depth.real() {
                    warn!(depth = h, tank = self.depth.real(), "tank overflows");
                }
                debug!(change = ?change.map(|c| &c.name), from = self.level, to = h, "tank retargeted");
                self.retarget(h);
            }
            Err(reason) => {
                debug!(%reason, "tank state invalid, animation halted");
                self.stop_animation();
            }
        }
    }

    fn draw(&self, surface: &mut dyn DisplaySurface) {
        let (width, height) = surface.size();
        let (x0, y0) = (50.0, 50.0);
        let tank_width = (width - 200.0).max(100.0);
        let tank_height = (height - 100.0).max(50.0);
        let (x1, y1) = (x0 + tank_width, y0 + tank_height);

        surface.clear();

        let tank_depth = self.depth.real();
        let partial = if tank_depth > 0.0 {
            self.level / tank_depth
        } else {
            f64::INFINITY
        };
        let water_top = if partial > 1.0 {
            surface.set_fill(Color::RED);
            surface.draw_text(x1 + 15.0, y0 - 5.0, "OVERFLOW!");
            y0 - 5.0
        } else {
            y0 + tank_height * (1.0 - partial)
        };

        // Inflow stream and water column
        surface.set_fill(Color::WATER);
        surface.draw_rect(x0 + 10.0, 10.0, 5.0 + self.flow.real() * 20.0, water_top - 10.0, Paint::Fill);
        surface.draw_rect(x0 + 1.0, water_top, tank_width - 1.5, y1 - water_top - 1.0, Paint::Fill);
        surface.set_stroke(Color::WATER_SURFACE);
        surface.draw_line(x0 + 1.0, water_top, x1 - 0.5, water_top);

        // Depth marker
        surface.set_stroke(Color::BLACK);
        surface.set_line_width(1.0);
        surface.draw_line(x0 - 10.0, water_top, x0 - 10.0, y1);
        surface.set_fill(Color::BLACK);
        surface.draw_text(x0 - 30.0, (water_top + y1) / 2.0, "h");
        surface.draw_text(
            x1 + 15.0,
            y1,
            &format!("h = {:.p$} m", self.level, p = self.precision),
        );

        // Holes: width in px equals the diameter in cm
        let hole_px = self.holes.first().map_or(0.0, |h| h.diameter * 100.0);
        for x in self.hole_positions(x0, tank_width, 15.0) {
            surface.draw_rect(x - hole_px / 2.0, y1, hole_px, 20.0, Paint::Fill);
        }

        // Walls
        surface.set_stroke(Color::PIPE_WALL);
        surface.set_line_width(3.0);
        surface.draw_polyline(&[(x0, y0), (x0, y1), (x1, y1), (x1, y0)]);
        surface.set_line_width(1.0);
    }

    fn tick(&mut self) -> bool {
        let Some(task) = &self.task else {
            return false;
        };
        let finished = task.is_finished();
        let latest = task.latest();
        if finished {
            self.task = None;
        }
        match latest {
            Some(level) => {
                self.level = level;
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
