use serde_json::json;
use veriflow_core::catalog::{DocListConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Documentation list: certificates, manuals, warranty links.
pub struct DocListRenderer;

impl SectionRenderer for DocListRenderer {
    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: DocListConfig = parse_config(section)?;
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({"items": config.items}),
        ))
    }
}
