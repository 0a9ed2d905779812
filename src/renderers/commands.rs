//! Platform-agnostic drawing commands.
//!
//! Models describe their sketches as a sequence of [`RenderCommand`]s so the
//! same drawing code can feed an SVG writer, a test recorder or any host
//! canvas.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// CSS representation (`#rrggbb`, or `rgba(..)` when translucent).
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }

    // Common colors
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Self = Self::rgb(230, 230, 230);

    // Sketch colors
    pub const WATER: Self = Self::new(144, 211, 214, 191);
    pub const WATER_SURFACE: Self = Self::rgb(202, 250, 212);
    pub const PIPE_WALL: Self = Self::rgb(40, 40, 40);
    pub const PIPE_FILL: Self = Self::rgb(200, 182, 195);
    pub const PIPE_INLET: Self = Self::rgb(222, 202, 215);
    pub const PIPE_OUTLET: Self = Self::rgb(158, 144, 153);
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    /// Interior only, with the current fill color.
    Fill,
    /// Outline only, with the current stroke color and width.
    Stroke,
    /// Interior and outline.
    FillAndStroke,
}

impl Paint {
    /// Whether the interior is painted.
    #[must_use]
    pub const fn fills(self) -> bool {
        matches!(self, Self::Fill | Self::FillAndStroke)
    }

    /// Whether the outline is painted.
    #[must_use]
    pub const fn strokes(self) -> bool {
        matches!(self, Self::Stroke | Self::FillAndStroke)
    }
}

/// Platform-agnostic render command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Erase everything drawn so far.
    Clear,

    /// Set the fill color for subsequent shapes and text.
    SetFill { color: Color },

    /// Set the stroke color for subsequent outlines and lines.
    SetStroke { color: Color },

    /// Set the stroke width.
    SetLineWidth { width: f64 },

    /// Axis-aligned rectangle with top-left corner at (x, y).
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
    },

    /// Straight line segment.
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },

    /// Axis-aligned ellipse.
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        paint: Paint,
    },

    /// Circular arc from `start` to `end` (radians, clockwise on screen).
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        paint: Paint,
    },

    /// Closed polygon.
    Polygon {
        points: Vec<(f64, f64)>,
        paint: Paint,
    },

    /// Text label with baseline origin at (x, y).
    Text { x: f64, y: f64, text: String },
}
