//! # Telemetry: Observability Decorators
//!
//! Decorators for adding tracing to section renderers without touching the
//! renderers themselves.

use crate::document::Section;
use crate::error::RenderError;
use crate::registry::{SectionRegistry, SectionRenderer};
use crate::render::{RenderContext, RenderedNode};

/// A wrapper renderer that adds a tracing span around any inner renderer.
pub struct Traced<R> {
    inner: R,
    name: String,
}

impl<R> Traced<R> {
    pub fn new(inner: R, name: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
        }
    }
}

impl<R: SectionRenderer> SectionRenderer for Traced<R> {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let span = tracing::info_span!(
            "Section",
            veriflow.renderer = %self.name,
            veriflow.section = %section.id,
            veriflow.tag = %section.kind
        );
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.render(section, ctx, registry);
        let duration = start.elapsed();

        match &result {
            Ok(RenderedNode::Unknown { tag, .. }) => {
                tracing::debug!(%tag, ?duration, "render completed: unknown placeholder");
            }
            Ok(_) => {
                tracing::debug!(?duration, "render completed");
            }
            Err(error) => {
                tracing::error!(%error, ?duration, "render failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::passthrough;

    #[test]
    fn traced_renderer_is_transparent() {
        let mut registry = SectionRegistry::new();
        registry.register("text", Traced::new(passthrough, "text"));
        let section = Section::new("text", 0);
        let node = registry.render(&section, &RenderContext::default());
        assert!(matches!(node, RenderedNode::Element { .. }));
    }
}
