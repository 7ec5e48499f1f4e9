//! Section Dispatch Registry
//!
//! Maps a variant tag to its renderer. Resolution is total: an unregistered
//! tag resolves to the built-in unknown-section renderer, and a renderer
//! failure is confined to that one section by the render boundary.

use crate::document::{Page, Section};
use crate::error::RenderError;
use crate::render::{RenderContext, RenderedNode};
use ahash::AHashMap;
use serde_json::json;

/// A concrete renderer for one section variant.
///
/// Renderers receive the registry so container variants (columns) can
/// dispatch their child slots through the same table.
pub trait SectionRenderer: Send + Sync {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError>;
}

impl<F> SectionRenderer for F
where
    F: Fn(&Section, &RenderContext, &SectionRegistry) -> Result<RenderedNode, RenderError>
        + Send
        + Sync,
{
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        self(section, ctx, registry)
    }
}

/// Deterministic fallback for tags nothing is registered under.
struct UnknownSection;

impl SectionRenderer for UnknownSection {
    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        Ok(RenderedNode::Unknown {
            id: section.id.clone(),
            tag: section.kind.clone(),
        })
    }
}

/// The dispatch table. Adding a variant means adding one entry; the
/// dispatcher itself never changes.
pub struct SectionRegistry {
    renderers: AHashMap<String, Box<dyn SectionRenderer>>,
    fallback: Box<dyn SectionRenderer>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        SectionRegistry {
            renderers: AHashMap::new(),
            fallback: Box::new(UnknownSection),
        }
    }

    pub fn register(&mut self, tag: impl Into<String>, renderer: impl SectionRenderer + 'static) {
        self.renderers.insert(tag.into(), Box::new(renderer));
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.renderers.contains_key(tag)
    }

    /// Total resolution: unknown tags get the fallback, never an absence.
    pub fn resolve(&self, tag: &str) -> &dyn SectionRenderer {
        match self.renderers.get(tag) {
            Some(renderer) => renderer.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    /// Render one section behind the per-instance failure boundary.
    ///
    /// A renderer error becomes an error placeholder carrying the section
    /// id, tag and message; siblings are unaffected. Rendering is
    /// synchronous and idempotent, so there is nothing to retry.
    pub fn render(&self, section: &Section, ctx: &RenderContext) -> RenderedNode {
        let known = self.is_registered(&section.kind);
        if !known {
            tracing::warn!(
                section = %section.id,
                tag = %section.kind,
                "no renderer registered, using unknown-section placeholder"
            );
        }
        if ctx.trace {
            tracing::debug!(
                section = %section.id,
                tag = %section.kind,
                dispatch = if known { "registered" } else { "fallback" },
                "section dispatch"
            );
        }
        match self.resolve(&section.kind).render(section, ctx, self) {
            Ok(node) => node,
            Err(error) => {
                tracing::warn!(
                    section = %section.id,
                    tag = %section.kind,
                    %error,
                    "section renderer failed, substituting error placeholder"
                );
                RenderedNode::Error {
                    id: section.id.clone(),
                    tag: section.kind.clone(),
                    message: error.to_string(),
                }
            }
        }
    }

    /// Render a section list in `order` order.
    pub fn render_sections(&self, sections: &[Section], ctx: &RenderContext) -> Vec<RenderedNode> {
        let mut ordered: Vec<&Section> = sections.iter().collect();
        ordered.sort_by_key(|s| s.order);
        ordered.iter().map(|s| self.render(s, ctx)).collect()
    }

    /// Render one page: its sections plus the page's settings flowing into
    /// the context.
    pub fn render_page(&self, page: &Page, ctx: &RenderContext) -> Vec<RenderedNode> {
        let mut page_ctx = ctx.clone();
        page_ctx.page_settings = page.settings.clone();
        self.render_sections(&page.sections, &page_ctx)
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("SectionRegistry").field("tags", &tags).finish()
    }
}

/// Convenience renderer used in tests and demos: renders the section's
/// config verbatim as element props.
pub fn passthrough(
    section: &Section,
    _ctx: &RenderContext,
    _registry: &SectionRegistry,
) -> Result<RenderedNode, RenderError> {
    Ok(RenderedNode::element(
        &section.id,
        &section.kind,
        json!({"config": section.config}),
    ))
}
