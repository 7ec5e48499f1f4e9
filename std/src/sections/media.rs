use serde_json::json;
use veriflow_core::catalog::{ImageConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Static image block. An image without a URL is a config fault, isolated
/// to this section by the registry boundary.
pub struct ImageRenderer;

impl SectionRenderer for ImageRenderer {
    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: ImageConfig = parse_config(section)?;
        if config.url.is_empty() {
            return Err(RenderError::invalid_config(&section.id, "image url missing"));
        }
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "url": config.url,
                "alt": config.alt.unwrap_or_default(),
                "width": config.width,
            }),
        ))
    }
}
