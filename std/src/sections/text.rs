use serde_json::json;
use veriflow_core::catalog::{TextConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Rich-text block.
pub struct TextRenderer;

impl SectionRenderer for TextRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: TextConfig = parse_config(section)?;
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "heading": config.heading,
                "content": config.content,
                "align": config.align.unwrap_or_else(|| "left".to_string()),
                "color": ctx.tokens.text,
                "font_family": ctx.tokens.font_family,
            }),
        ))
    }
}
