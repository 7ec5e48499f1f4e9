//! Layout blocks: divider, multi-column container, footer.

use serde_json::json;
use veriflow_core::catalog::{ColumnsConfig, DividerConfig, FooterConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

pub struct DividerRenderer;

impl SectionRenderer for DividerRenderer {
    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: DividerConfig = parse_config(section)?;
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({"thickness": config.thickness.unwrap_or(1)}),
        ))
    }
}

/// Multi-column container. `children` holds one independent section list
/// per column slot, exactly one level deep; each slot is dispatched back
/// through the registry so nested blocks get the same fallback and failure
/// isolation as top-level ones.
pub struct ColumnsRenderer;

impl SectionRenderer for ColumnsRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: ColumnsConfig = parse_config(section)?;
        let empty: Vec<Vec<Section>> = Vec::new();
        let slots = section.children.as_ref().unwrap_or(&empty);

        let mut children = Vec::with_capacity(config.columns);
        for index in 0..config.columns {
            let slot_nodes = match slots.get(index) {
                Some(slot) => registry.render_sections(slot, ctx),
                None => Vec::new(),
            };
            children.push(RenderedNode::Element {
                id: format!("{}-col-{}", section.id, index),
                tag: "column".to_string(),
                props: json!({"index": index}),
                children: slot_nodes,
            });
        }

        Ok(RenderedNode::Element {
            id: section.id.clone(),
            tag: section.kind.clone(),
            props: json!({"columns": config.columns, "gap": config.gap}),
            children,
        })
    }
}

pub struct FooterRenderer;

impl SectionRenderer for FooterRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: FooterConfig = parse_config(section)?;
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "text": config.text,
                "links": config.links,
                "background": ctx.tokens.secondary,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::register_standard;
    use serde_json::json;

    fn registry() -> SectionRegistry {
        let mut registry = SectionRegistry::new();
        register_standard(&mut registry);
        registry
    }

    #[test]
    fn columns_render_each_slot_through_the_registry() {
        let mut section = Section::new("columns", 0);
        section.config = json!({"columns": 2});
        section.children = Some(vec![
            vec![{
                let mut s = Section::new("text", 0);
                s.config = json!({"content": "left"});
                s
            }],
            vec![{
                let mut s = Section::new("mystery_widget", 0);
                s.id = "m1".to_string();
                s
            }],
        ]);

        let node = ColumnsRenderer
            .render(&section, &RenderContext::default(), &registry())
            .unwrap();
        let RenderedNode::Element { children, .. } = node else {
            panic!("expected element");
        };
        assert_eq!(children.len(), 2);

        let RenderedNode::Element { children: left, .. } = &children[0] else {
            panic!("expected column element");
        };
        assert!(matches!(left[0], RenderedNode::Element { .. }));

        // Unknown tag inside a column slot degrades to a placeholder, not
        // a failure of the whole container.
        let RenderedNode::Element { children: right, .. } = &children[1] else {
            panic!("expected column element");
        };
        assert!(matches!(right[0], RenderedNode::Unknown { .. }));
    }

    #[test]
    fn missing_slots_render_as_empty_columns() {
        let mut section = Section::new("columns", 0);
        section.config = json!({"columns": 3});
        section.children = Some(vec![vec![Section::new("divider", 0)]]);

        let node = ColumnsRenderer
            .render(&section, &RenderContext::default(), &registry())
            .unwrap();
        let RenderedNode::Element { children, .. } = node else {
            panic!("expected element");
        };
        assert_eq!(children.len(), 3);
        let RenderedNode::Element { children: last, .. } = &children[2] else {
            panic!("expected column element");
        };
        assert!(last.is_empty());
    }

    #[test]
    fn slot_sections_sort_by_order() {
        let mut late = Section::new("text", 0);
        late.id = "late".to_string();
        late.order = 9;
        let mut early = Section::new("text", 0);
        early.id = "early".to_string();
        early.order = 2;

        let mut section = Section::new("columns", 0);
        section.config = json!({"columns": 1});
        section.children = Some(vec![vec![late, early]]);

        let node = ColumnsRenderer
            .render(&section, &RenderContext::default(), &registry())
            .unwrap();
        let RenderedNode::Element { children, .. } = node else {
            panic!("expected element");
        };
        let RenderedNode::Element { children: slot, .. } = &children[0] else {
            panic!("expected column element");
        };
        match &slot[0] {
            RenderedNode::Element { id, .. } => assert_eq!(id, "early"),
            other => panic!("unexpected node {other:?}"),
        }
    }
}
