use serde_json::json;
use veriflow_core::catalog::{CtaConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Call-to-action button.
///
/// Rendering only wires the navigation target into the element; the actual
/// `navigate` intent is raised through the context handle when the host
/// reports the press (`CtaRenderer::press`). Rendering stays idempotent.
pub struct CtaRenderer;

impl CtaRenderer {
    /// Raise the navigation intent a pressed CTA carries.
    pub fn press(section: &Section, ctx: &RenderContext) {
        let target = section
            .config
            .get("target")
            .and_then(|v| v.as_str())
            .unwrap_or("next");
        ctx.navigator.request_raw(target);
    }
}

impl SectionRenderer for CtaRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: CtaConfig = parse_config(section)?;
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "label": config.label,
                "target": config.target.unwrap_or_else(|| "next".to_string()),
                "style": config.style,
                "background": ctx.tokens.primary,
                "radius": ctx.tokens.button_radius,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veriflow_core::navigation::NavTarget;

    #[test]
    fn render_carries_target_without_navigating() {
        let mut section = Section::new("call_to_action", 0);
        section.config = json!({"label": "Continue", "target": "final"});
        let ctx = RenderContext::default();
        let node = CtaRenderer
            .render(&section, &ctx, &SectionRegistry::new())
            .unwrap();
        match node {
            RenderedNode::Element { props, .. } => assert_eq!(props["target"], "final"),
            other => panic!("unexpected node {other:?}"),
        }
        assert!(ctx.navigator.drain().is_empty());
    }

    #[test]
    fn press_queues_the_configured_target() {
        let mut section = Section::new("call_to_action", 0);
        section.config = json!({"target": "final"});
        let ctx = RenderContext::default();
        CtaRenderer::press(&section, &ctx);
        assert_eq!(ctx.navigator.drain(), vec![NavTarget::Final]);
    }

    #[test]
    fn press_defaults_to_next() {
        let section = Section::new("call_to_action", 0);
        let ctx = RenderContext::default();
        CtaRenderer::press(&section, &ctx);
        assert_eq!(ctx.navigator.drain(), vec![NavTarget::Next]);
    }
}
