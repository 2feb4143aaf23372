//! SVG rendering of the graph projection.
//!
//! Layout coordinates map linearly into the canvas inside a margin, with the
//! y axis pointing up so the event tier sits above the interpretation tier.

use crate::config::RenderConfig;
use crate::projection::{EmotionGraph, Position};

/// File name of an exported graph image for the given date.
pub fn graph_file_name(date: &str) -> String {
    format!("grafo_emocional_{}.svg", date)
}

/// Escapes text for use in SVG content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps graph units to canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    min: Position,
    span_x: f64,
    span_y: f64,
    margin: f64,
    usable_w: f64,
    usable_h: f64,
}

impl Viewport {
    fn fit(graph: &EmotionGraph, config: &RenderConfig) -> Option<Self> {
        let (min, max) = graph.bounds()?;
        Some(Self {
            min,
            // A single tier or column still needs a nonzero span
            span_x: (max.x - min.x).max(1.0),
            span_y: (max.y - min.y).max(1.0),
            margin: config.margin,
            usable_w: (config.width - 2.0 * config.margin).max(0.0),
            usable_h: (config.height - 2.0 * config.margin).max(0.0),
        })
    }

    fn project(&self, p: Position) -> (f64, f64) {
        let px = self.margin + (p.x - self.min.x) / self.span_x * self.usable_w;
        let py = self.margin + self.usable_h - (p.y - self.min.y) / self.span_y * self.usable_h;
        (px, py)
    }
}

/// Renders an [`EmotionGraph`] as a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the graph. An empty graph yields an empty canvas.
    pub fn render(&self, graph: &EmotionGraph) -> String {
        let cfg = &self.config;
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = cfg.width,
            h = cfg.height
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{}"/></marker></defs>"#,
            escape_xml(&cfg.edge_color)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            cfg.width,
            cfg.height,
            escape_xml(&cfg.background_color)
        ));
        svg.push('\n');

        let Some(viewport) = Viewport::fit(graph, cfg) else {
            svg.push_str("</svg>\n");
            return svg;
        };

        // Edges first so nodes paint over them
        for edge in graph.edges() {
            let Some((from, to)) = graph.endpoints(edge) else {
                continue;
            };
            let (x1, y1) = viewport.project(from.position);
            let (x2, y2) = viewport.project(to.position);
            let (x1, y1, x2, y2) = trim_to_circles(x1, y1, x2, y2, cfg.node_radius);
            svg.push_str(&format!(
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1" marker-end="url(#arrow)"/>"#,
                x1,
                y1,
                x2,
                y2,
                escape_xml(&cfg.edge_color)
            ));
            svg.push('\n');
        }

        for node in graph.nodes() {
            let (cx, cy) = viewport.project(node.position);
            svg.push_str(&format!(
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                cx,
                cy,
                cfg.node_radius,
                escape_xml(&cfg.node_color)
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"  <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                cx,
                cy,
                cfg.font_size,
                escape_xml(&node.label)
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Shortens a segment so it starts and ends on the node circles.
///
/// Segments shorter than two radii are returned unchanged.
fn trim_to_circles(x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> (f64, f64, f64, f64) {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= 2.0 * radius {
        return (x1, y1, x2, y2);
    }
    let (ux, uy) = (dx / len, dy / len);
    (
        x1 + ux * radius,
        y1 + uy * radius,
        x2 - ux * radius,
        y2 - uy * radius,
    )
}
