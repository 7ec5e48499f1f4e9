use serde_json::json;
use veriflow_core::catalog::{StorePickerConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Store picker: offers the campaign's approved stores (and optionally an
/// online channel). Selection is a request against the input bag, applied
/// by the host, never a direct document mutation.
pub struct StorePickerRenderer;

impl StorePickerRenderer {
    pub fn select_store(ctx: &RenderContext, store_id: &str) {
        ctx.inputs.set("selected_store", json!(store_id));
        ctx.inputs.set("purchase_channel", json!("in_store"));
    }

    pub fn select_online(ctx: &RenderContext) {
        ctx.inputs.set("purchase_channel", json!("online"));
    }
}

impl SectionRenderer for StorePickerRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: StorePickerConfig = parse_config(section)?;
        if ctx.stores.is_empty() && !config.allow_online {
            tracing::debug!(section = %section.id, "store picker rendered with no approved stores");
        }
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "prompt": config
                    .prompt
                    .unwrap_or_else(|| "Where did you purchase this product?".to_string()),
                "stores": ctx.stores,
                "allow_online": config.allow_online,
                "selected": ctx.inputs.get("selected_store"),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriflow_core::render::ApprovedStore;

    #[test]
    fn renders_approved_store_list() {
        let mut ctx = RenderContext::default();
        ctx.stores = vec![ApprovedStore {
            id: "st-1".to_string(),
            name: "Flagship".to_string(),
            url: None,
        }];
        let node = StorePickerRenderer
            .render(&Section::new("store_picker", 0), &ctx, &SectionRegistry::new())
            .unwrap();
        match node {
            RenderedNode::Element { props, .. } => {
                assert_eq!(props["stores"][0]["id"], "st-1");
                assert_eq!(props["allow_online"], false);
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn selection_lands_in_the_input_bag() {
        let ctx = RenderContext::default();
        StorePickerRenderer::select_store(&ctx, "st-9");
        assert_eq!(ctx.inputs.get("selected_store"), Some(json!("st-9")));
        assert_eq!(ctx.inputs.get("purchase_channel"), Some(json!("in_store")));
    }
}
