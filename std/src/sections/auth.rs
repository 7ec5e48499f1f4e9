//! Authentication-adjacent blocks: the login step and the verification
//! result card. Provider integration itself lives behind the host; these
//! renderers only shape what the customer sees.

use serde_json::json;
use veriflow_core::catalog::{AuthResultConfig, LoginStepConfig, parse_config};
use veriflow_core::document::Section;
use veriflow_core::error::RenderError;
use veriflow_core::registry::{SectionRegistry, SectionRenderer};
use veriflow_core::render::{RenderContext, RenderedNode};

/// Account-creation / login form step. Field values are requested into the
/// input bag; the page's `authConfig` (from page settings) passes through
/// untouched for the external auth collaborator.
pub struct LoginStepRenderer;

impl LoginStepRenderer {
    pub fn set_field(ctx: &RenderContext, field: &str, value: &str) {
        ctx.inputs.set(format!("account.{field}"), json!(value));
    }
}

impl SectionRenderer for LoginStepRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: LoginStepConfig = parse_config(section)?;
        let fields = if config.fields.is_empty() {
            vec!["email".to_string()]
        } else {
            config.fields
        };
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "fields": fields,
                "submit_label": config.submit_label.unwrap_or_else(|| "Continue".to_string()),
                "auth_config": ctx.page_settings.get("authConfig"),
            }),
        ))
    }
}

/// Verification result card. `is_authentic` is tri-state: `None` while the
/// check is pending, then genuine/counterfeit.
pub struct AuthResultRenderer;

impl SectionRenderer for AuthResultRenderer {
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext,
        _registry: &SectionRegistry,
    ) -> Result<RenderedNode, RenderError> {
        let config: AuthResultConfig = parse_config(section)?;
        let (status, message) = match ctx.is_authentic {
            Some(true) => (
                "genuine",
                config
                    .genuine_message
                    .unwrap_or_else(|| "This product is genuine.".to_string()),
            ),
            Some(false) => (
                "counterfeit",
                config
                    .counterfeit_message
                    .unwrap_or_else(|| "This code could not be verified.".to_string()),
            ),
            None => (
                "pending",
                config
                    .pending_message
                    .unwrap_or_else(|| "Verifying your code...".to_string()),
            ),
        };
        Ok(RenderedNode::element(
            &section.id,
            &section.kind,
            json!({
                "status": status,
                "message": message,
                "accent": ctx.tokens.accent,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_result_is_tri_state() {
        let section = Section::new("auth_result", 0);
        let registry = SectionRegistry::new();

        let mut ctx = RenderContext::default();
        for (state, expected) in [
            (None, "pending"),
            (Some(true), "genuine"),
            (Some(false), "counterfeit"),
        ] {
            ctx.is_authentic = state;
            let node = AuthResultRenderer.render(&section, &ctx, &registry).unwrap();
            match node {
                RenderedNode::Element { props, .. } => assert_eq!(props["status"], expected),
                other => panic!("unexpected node {other:?}"),
            }
        }
    }

    #[test]
    fn login_step_passes_auth_config_from_page_settings() {
        let section = Section::new("login_step", 0);
        let mut ctx = RenderContext::default();
        ctx.page_settings = json!({"authConfig": {"provider": "external"}});
        let node = LoginStepRenderer
            .render(&section, &ctx, &SectionRegistry::new())
            .unwrap();
        match node {
            RenderedNode::Element { props, .. } => {
                assert_eq!(props["auth_config"]["provider"], "external");
                assert_eq!(props["fields"][0], "email");
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn account_fields_are_namespaced_in_the_input_bag() {
        let ctx = RenderContext::default();
        LoginStepRenderer::set_field(&ctx, "email", "c@example.com");
        assert_eq!(ctx.inputs.get("account.email"), Some(json!("c@example.com")));
    }
}
