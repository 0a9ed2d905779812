//! Drawing surfaces for demo sketches.
//!
//! Models never build concrete graphics. They receive a `&mut dyn
//! DisplaySurface` and issue primitive operations, which every surface
//! lowers to [`RenderCommand`]s.
//!
//! # Architecture
//!
//! ```text
//! Model::draw(surface)
//!       ↓
//! ┌─────────────────────┐
//! │   DisplaySurface    │
//! │ (RenderCommand API) │
//! └─────────────────────┘
//!       ↓           ↓
//!  CommandRecorder  SvgSurface
//! ```

pub mod commands;
pub mod recorder;
pub mod svg;

pub use commands::{Color, Paint, RenderCommand};
pub use recorder::CommandRecorder;
pub use svg::SvgSurface;

/// Target of primitive drawing operations.
///
/// Implementors only provide [`size`](Self::size) and
/// [`execute`](Self::execute); the drawing methods are conveniences that
/// build the matching [`RenderCommand`]. Coordinates are in surface pixels
/// with the origin top-left and `y` growing downwards.
pub trait DisplaySurface {
    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);

    /// Apply one command.
    fn execute(&mut self, command: RenderCommand);

    fn clear(&mut self) {
        self.execute(RenderCommand::Clear);
    }

    fn set_fill(&mut self, color: Color) {
        self.execute(RenderCommand::SetFill { color });
    }

    fn set_stroke(&mut self, color: Color) {
        self.execute(RenderCommand::SetStroke { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.execute(RenderCommand::SetLineWidth { width });
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.execute(RenderCommand::Rect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.execute(RenderCommand::Line { x1, y1, x2, y2 });
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, paint: Paint) {
        self.execute(RenderCommand::Ellipse {
            cx,
            cy,
            rx,
            ry,
            paint,
        });
    }

    fn draw_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, paint: Paint) {
        self.execute(RenderCommand::Arc {
            cx,
            cy,
            radius,
            start,
            end,
            paint,
        });
    }

    fn draw_polygon(&mut self, points: &[(f64, f64)], paint: Paint) {
        self.execute(RenderCommand::Polygon {
            points: points.to_vec(),
            paint,
        });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        self.execute(RenderCommand::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Polyline through `points` as consecutive line segments.
    fn draw_polyline(&mut self, points: &[(f64, f64)]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0].0, pair[0].1, pair[1].0, pair[1].1);
        }
    }
}
