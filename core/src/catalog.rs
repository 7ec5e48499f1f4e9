//! Section Catalog
//!
//! The known content-block variants and their declared config shapes.
//! The tag space itself is open: documents may carry tags not listed here,
//! and those flow through the registry's unknown-section fallback.

use crate::document::Section;
use crate::error::RenderError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Wire tags for the known variants.
pub mod tags {
    pub const TEXT: &str = "text";
    pub const IMAGE: &str = "image";
    pub const CALL_TO_ACTION: &str = "call_to_action";
    pub const DIVIDER: &str = "divider";
    pub const COLUMNS: &str = "columns";
    pub const STORE_PICKER: &str = "store_picker";
    pub const LOGIN_STEP: &str = "login_step";
    pub const AUTH_RESULT: &str = "auth_result";
    pub const DOC_LIST: &str = "doc_list";
    pub const FOOTER: &str = "footer";
}

/// The closed set of variants this build ships renderers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Text,
    Image,
    CallToAction,
    Divider,
    Columns,
    StorePicker,
    LoginStep,
    AuthResult,
    DocList,
    Footer,
}

impl SectionKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            tags::TEXT => Some(SectionKind::Text),
            tags::IMAGE => Some(SectionKind::Image),
            tags::CALL_TO_ACTION => Some(SectionKind::CallToAction),
            tags::DIVIDER => Some(SectionKind::Divider),
            tags::COLUMNS => Some(SectionKind::Columns),
            tags::STORE_PICKER => Some(SectionKind::StorePicker),
            tags::LOGIN_STEP => Some(SectionKind::LoginStep),
            tags::AUTH_RESULT => Some(SectionKind::AuthResult),
            tags::DOC_LIST => Some(SectionKind::DocList),
            tags::FOOTER => Some(SectionKind::Footer),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Text => tags::TEXT,
            SectionKind::Image => tags::IMAGE,
            SectionKind::CallToAction => tags::CALL_TO_ACTION,
            SectionKind::Divider => tags::DIVIDER,
            SectionKind::Columns => tags::COLUMNS,
            SectionKind::StorePicker => tags::STORE_PICKER,
            SectionKind::LoginStep => tags::LOGIN_STEP,
            SectionKind::AuthResult => tags::AUTH_RESULT,
            SectionKind::DocList => tags::DOC_LIST,
            SectionKind::Footer => tags::FOOTER,
        }
    }
}

/// Decode a section's free-form `config` into its declared shape.
///
/// Decode failure is a renderer failure (isolated to the one section),
/// never a document failure.
pub fn parse_config<T: DeserializeOwned + Default>(section: &Section) -> Result<T, RenderError> {
    if section.config.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(section.config.clone())
        .map_err(|e| RenderError::invalid_config(&section.id, e))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CtaConfig {
    #[serde(default)]
    pub label: String,
    /// Navigation target: `next`, `previous`, `final` or an explicit page id.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DividerConfig {
    #[serde(default)]
    pub thickness: Option<u32>,
}

fn default_column_count() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_column_count")]
    pub columns: usize,
    #[serde(default)]
    pub gap: Option<u32>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        ColumnsConfig {
            columns: default_column_count(),
            gap: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorePickerConfig {
    #[serde(default)]
    pub prompt: Option<String>,
    /// Offer an "online purchase" channel in addition to physical stores.
    #[serde(default)]
    pub allow_online: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginStepConfig {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResultConfig {
    #[serde(default)]
    pub genuine_message: Option<String>,
    #[serde(default)]
    pub counterfeit_message: Option<String>,
    #[serde(default)]
    pub pending_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocListConfig {
    #[serde(default)]
    pub items: Vec<DocItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterConfig {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub links: Vec<DocItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_tags_round_trip() {
        for kind in [
            SectionKind::Text,
            SectionKind::Columns,
            SectionKind::StorePicker,
            SectionKind::Footer,
        ] {
            assert_eq!(SectionKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SectionKind::from_tag("hologram_spinner"), None);
    }

    #[test]
    fn null_config_parses_to_default() {
        let mut section = Section::new(tags::TEXT, 0);
        section.config = serde_json::Value::Null;
        let cfg: TextConfig = parse_config(&section).unwrap();
        assert_eq!(cfg.content, "");
    }

    #[test]
    fn wrong_shape_is_an_isolated_config_error() {
        let mut section = Section::new(tags::COLUMNS, 0);
        section.config = json!({"columns": "two"});
        let err = parse_config::<ColumnsConfig>(&section).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RenderError::InvalidConfig { .. }
        ));
    }
}
