//! SVG surface.
//!
//! Keeps the current fill, stroke and line width as drawing state and turns
//! each shape command into one SVG element. [`SvgSurface::to_svg`] wraps the
//! elements into a standalone document.

use std::fmt::Write as _;

use super::{Color, DisplaySurface, Paint, RenderCommand};

/// Renders commands into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    fill: Color,
    stroke: Color,
    line_width: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            elements: Vec::new(),
        }
    }

    /// Number of elements drawn since the last clear.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push('\n');
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn paint_attrs(&self, paint: Paint) -> String {
        let fill = if paint.fills() {
            self.fill.to_css()
        } else {
            "none".to_string()
        };
        if paint.strokes() {
            format!(
                r#"fill="{fill}" stroke="{}" stroke-width="{}""#,
                self.stroke.to_css(),
                self.line_width
            )
        } else {
            format!(r#"fill="{fill}""#)
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

impl DisplaySurface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn execute(&mut self, command: RenderCommand) {
        let element = match command {
            RenderCommand::Clear => {
                self.elements.clear();
                return;
            }
            RenderCommand::SetFill { color } => {
                self.fill = color;
                return;
            }
            RenderCommand::SetStroke { color } => {
                self.stroke = color;
                return;
            }
            RenderCommand::SetLineWidth { width } => {
                self.line_width = width;
                return;
            }
            RenderCommand::Rect {
                x,
                y,
                width,
                height,
                paint,
            } => format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" {}/>"#,
                self.paint_attrs(paint)
            ),
            RenderCommand::Line { x1, y1, x2, y2 } => format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{}"/>"#,
                self.stroke.to_css(),
                self.line_width
            ),
            RenderCommand::Ellipse {
                cx,
                cy,
                rx,
                ry,
                paint,
            } => format!(
                r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" {}/>"#,
                self.paint_attrs(paint)
            ),
            RenderCommand::Arc {
                cx,
                cy,
                radius,
                start,
                end,
                paint,
            } => {
                let (x0, y0) = (cx + radius * start.cos(), cy + radius * start.sin());
                let (x1, y1) = (cx + radius * end.cos(), cy + radius * end.sin());
                let large = u8::from((end - start).abs() > std::f64::consts::PI);
                let close = if paint.fills() { " Z" } else { "" };
                format!(
                    r#"<path d="M {x0} {y0} A {radius} {radius} 0 {large} 1 {x1} {y1}{close}" {}/>"#,
                    self.paint_attrs(paint)
                )
            }
            RenderCommand::Polygon { points, paint } => {
                let mut coords = String::new();
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        coords.push(' ');
                    }
                    let _ = write!(coords, "{x},{y}");
                }
                format!(
                    r#"<polygon points="{coords}" {}/>"#,
                    self.paint_attrs(paint)
                )
            }
            RenderCommand::Text { x, y, text } => format!(
                r#"<text x="{x}" y="{y}" fill="{}" font-family="sans-serif" font-size="14">{}</text>"#,
                self.fill.to_css(),
                escape(&text)
            ),
        };
        self.elements.push(element);
    }
}
