//! Style Token Resolver
//!
//! Merges brand defaults, a selected design template and campaign-level
//! overrides into one complete token set. Pure and total: any input may be
//! absent and the output never has missing keys.

use crate::document::FlowDocument;
use crate::render::CampaignContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The resolved visual tokens injected into every render context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTokenSet {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub font_family: String,
    pub heading_font: String,
    pub button_radius: String,
    pub template_id: Option<String>,
}

impl Default for StyleTokenSet {
    fn default() -> Self {
        StyleTokenSet {
            primary: "#1a1a2e".to_string(),
            secondary: "#16213e".to_string(),
            accent: "#0f3460".to_string(),
            background: "#ffffff".to_string(),
            text: "#222222".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            heading_font: "Inter, sans-serif".to_string(),
            button_radius: "6px".to_string(),
            template_id: None,
        }
    }
}

impl StyleTokenSet {
    /// Overlay a loose JSON token map onto this set. Unknown keys are
    /// ignored, non-string values are ignored; later layers win.
    fn apply(&mut self, overrides: &Value) {
        let Some(map) = overrides.as_object() else {
            return;
        };
        for (key, value) in map {
            let Some(text) = value.as_str() else { continue };
            match key.as_str() {
                "primary" => self.primary = text.to_string(),
                "secondary" => self.secondary = text.to_string(),
                "accent" => self.accent = text.to_string(),
                "background" => self.background = text.to_string(),
                "text" => self.text = text.to_string(),
                "font_family" | "fontFamily" => self.font_family = text.to_string(),
                "heading_font" | "headingFont" => self.heading_font = text.to_string(),
                "button_radius" | "buttonRadius" => self.button_radius = text.to_string(),
                _ => {}
            }
        }
    }

    pub fn as_props(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A design template fetched from the external catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Token overrides this template contributes.
    #[serde(default)]
    pub tokens: Value,
}

/// Resolve the token cascade: defaults → template → campaign overrides.
///
/// A failed or absent template fetch simply means the template layer
/// contributes nothing; that recovery is local, never an error.
pub fn resolve_tokens(
    campaign: Option<&CampaignContext>,
    flow: Option<&FlowDocument>,
    template: Option<&TemplateConfig>,
) -> StyleTokenSet {
    let mut tokens = StyleTokenSet::default();

    if let Some(template) = template {
        tokens.apply(&template.tokens);
        tokens.template_id = Some(template.id.clone());
    } else if let Some(id) = flow.and_then(|f| f.design_template_id.clone()) {
        // The flow references a template we could not load; remember the
        // reference, render with defaults.
        tokens.template_id = Some(id);
    }

    if let Some(flow) = flow {
        tokens.apply(&flow.theme);
    }

    if let Some(locked) = campaign.and_then(|c| c.locked_design_tokens.as_ref()) {
        tokens.apply(locked);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_absent_yields_complete_defaults() {
        let tokens = resolve_tokens(None, None, None);
        assert_eq!(tokens, StyleTokenSet::default());
        // Serialized form must carry every key.
        let props = tokens.as_props();
        for key in [
            "primary",
            "secondary",
            "accent",
            "background",
            "text",
            "font_family",
            "heading_font",
            "button_radius",
        ] {
            assert!(props.get(key).is_some(), "missing token `{key}`");
        }
    }

    #[test]
    fn campaign_overrides_win_over_template() {
        let template = TemplateConfig {
            id: "tmpl-1".to_string(),
            name: "Midnight".to_string(),
            tokens: json!({"primary": "#111111", "accent": "#222222"}),
        };
        let campaign = CampaignContext {
            id: "c1".to_string(),
            locked_design_tokens: Some(json!({"primary": "#ff0000"})),
            ..Default::default()
        };
        let tokens = resolve_tokens(Some(&campaign), None, Some(&template));
        assert_eq!(tokens.primary, "#ff0000");
        assert_eq!(tokens.accent, "#222222");
        assert_eq!(tokens.template_id.as_deref(), Some("tmpl-1"));
    }

    #[test]
    fn flow_theme_sits_between_template_and_campaign() {
        let template = TemplateConfig {
            id: "tmpl-1".to_string(),
            tokens: json!({"background": "#000000", "text": "#eeeeee"}),
            ..Default::default()
        };
        let flow = FlowDocument {
            theme: json!({"background": "#fafafa"}),
            ..Default::default()
        };
        let tokens = resolve_tokens(None, Some(&flow), Some(&template));
        assert_eq!(tokens.background, "#fafafa");
        assert_eq!(tokens.text, "#eeeeee");
    }

    #[test]
    fn unknown_and_non_string_override_keys_are_ignored() {
        let campaign = CampaignContext {
            id: "c1".to_string(),
            locked_design_tokens: Some(json!({"primary": 42, "glitter": "#f0f"})),
            ..Default::default()
        };
        let tokens = resolve_tokens(Some(&campaign), None, None);
        assert_eq!(tokens, StyleTokenSet::default());
    }

    #[test]
    fn unloadable_template_reference_is_remembered() {
        let flow = FlowDocument {
            design_template_id: Some("tmpl-gone".to_string()),
            ..Default::default()
        };
        let tokens = resolve_tokens(None, Some(&flow), None);
        assert_eq!(tokens.template_id.as_deref(), Some("tmpl-gone"));
        assert_eq!(tokens.primary, StyleTokenSet::default().primary);
    }
}
