use std::fmt::Write;
use std::sync::{Arc, PoisonError, RwLock};

use field_core::{Bounds, FieldError, Result, Scene, EDGE_STROKE_WIDTH};
use field_sim::SceneRenderer;

/// Read side of an [`SvgRenderer`]: the most recently drawn document.
#[derive(Debug, Clone, Default)]
pub struct SvgOutput(Arc<RwLock<String>>);

impl SvgOutput {
    pub fn latest(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, document: String) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = document;
    }
}

/// Renders each frame as a standalone SVG document.
///
/// Particles become filled circles and edges 0.5px lines, both in
/// `currentColor` so the embedding page controls the palette. Lines are drawn
/// after circles.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    viewport: Option<Bounds>,
    class: Option<String>,
    output: SvgOutput,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `viewBox` for this viewport instead of a bare 100% canvas
    pub fn with_viewport(mut self, viewport: Bounds) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// CSS class on the root element, e.g. a theme colour utility
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Handle for reading frames after the renderer is moved into a scheduler
    pub fn output(&self) -> SvgOutput {
        self.output.clone()
    }

    pub fn render_document(&self, scene: &Scene) -> Result<String> {
        let mut doc = String::with_capacity(128 + 96 * (scene.particles.len() + scene.edges.len()));
        self.write_document(&mut doc, scene)
            .map_err(|e| FieldError::render(format!("svg formatting: {e}")))?;
        Ok(doc)
    }

    fn write_document(&self, doc: &mut String, scene: &Scene) -> std::fmt::Result {
        doc.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%""#);
        if let Some(vp) = self.viewport {
            write!(doc, r#" viewBox="0 0 {} {}""#, vp.width, vp.height)?;
        }
        if let Some(class) = &self.class {
            write!(doc, r#" class="{}""#, escape_attr(class))?;
        }
        doc.push('>');

        for p in &scene.particles {
            write!(
                doc,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="currentColor" opacity="{:.3}"/>"#,
                p.x, p.y, p.size, p.opacity
            )?;
        }

        for l in &scene.edges {
            write!(
                doc,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="currentColor" stroke-width="{}" opacity="{:.3}"/>"#,
                l.x1, l.y1, l.x2, l.y2, EDGE_STROKE_WIDTH, l.opacity
            )?;
        }

        doc.push_str("</svg>");
        Ok(())
    }
}

impl SceneRenderer for SvgRenderer {
    fn draw(&mut self, scene: &Scene) -> Result<()> {
        let doc = self.render_document(scene)?;
        self.output.replace(doc);
        Ok(())
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
