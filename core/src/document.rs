//! Flow Document Model
//!
//! The page/section tree that defines one verification flow. The authoring
//! surface produces it, the runtime consumes it read-only.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic page types. The wire format uses snake_case tags
/// (`store_selection`, `thank_you`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Landing,
    StoreSelection,
    AccountCreation,
    Authentication,
    ContentDisplay,
    ThankYou,
}

impl PageType {
    /// Pages of these types cannot be deleted and are flagged mandatory
    /// regardless of what the stored record claims.
    pub fn is_mandatory(self) -> bool {
        matches!(
            self,
            PageType::StoreSelection
                | PageType::AccountCreation
                | PageType::Authentication
                | PageType::ThankYou
        )
    }

    /// Default display name used by the authoring surface.
    pub fn default_name(self) -> &'static str {
        match self {
            PageType::Landing => "Landing",
            PageType::StoreSelection => "Store Selection",
            PageType::AccountCreation => "Account Creation",
            PageType::Authentication => "Authentication",
            PageType::ContentDisplay => "Content",
            PageType::ThankYou => "Thank You",
        }
    }
}

/// One content block within a page; the unit of polymorphic dispatch.
///
/// `kind` is an open string tag: historical documents carry tags this build
/// has never heard of, and the registry must degrade per unknown tag rather
/// than fail the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub config: Value,
    /// Column slots, used only by the `columns` variant. Exactly one level
    /// of nesting: each slot is an independent flat section list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Vec<Section>>>,
}

impl Section {
    pub fn new(kind: impl Into<String>, order: i64) -> Self {
        Section {
            id: uuid::Uuid::new_v4().to_string(),
            kind: kind.into(),
            order,
            config: Value::Object(Default::default()),
            children: None,
        }
    }
}

/// One screen-worth of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Free-form per-page config (e.g. `authConfig` for authentication pages).
    #[serde(default)]
    pub settings: Value,
    #[serde(default, rename = "isMandatory")]
    pub is_mandatory: bool,
    #[serde(default)]
    pub order: i64,
}

impl Page {
    pub fn new(page_type: PageType, order: i64) -> Self {
        Page {
            id: uuid::Uuid::new_v4().to_string(),
            page_type,
            name: page_type.default_name().to_string(),
            sections: Vec::new(),
            settings: Value::Object(Default::default()),
            is_mandatory: page_type.is_mandatory(),
            order,
        }
    }

    /// Re-derive the invariants the stored record is not trusted to hold:
    /// the mandatory flag follows the page type, never the persisted bool.
    pub fn normalize(&mut self) {
        self.is_mandatory = self.page_type.is_mandatory();
    }

    /// Sections in render order. `order` values need not be contiguous;
    /// the sort is stable so equal orders keep their stored position.
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}

/// The authoritative description of one flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default, rename = "globalHeader")]
    pub global_header: Value,
    #[serde(default)]
    pub footer: Value,
    #[serde(default)]
    pub theme: Value,
    #[serde(default, rename = "designTemplateId")]
    pub design_template_id: Option<String>,
}

impl FlowDocument {
    /// Pages in render order (stable sort by the explicit `order` field).
    pub fn sorted_pages(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.order);
        pages
    }

    /// Index of the first thank-you page, if any.
    pub fn thank_you_index(&self) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.page_type == PageType::ThankYou)
    }

    /// Structural validation: unique page ids, unique section ids per page.
    /// An empty document is valid (the resolver labels it, it does not fail).
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut page_ids = ahash::AHashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(DocumentError::DuplicatePageId(page.id.clone()));
            }
            let mut section_ids = ahash::AHashSet::new();
            let mut stack: Vec<&Section> = page.sections.iter().collect();
            while let Some(section) = stack.pop() {
                if !section_ids.insert(section.id.as_str()) {
                    return Err(DocumentError::DuplicateSectionId {
                        page: page.id.clone(),
                        section: section.id.clone(),
                    });
                }
                if let Some(slots) = &section.children {
                    for slot in slots {
                        stack.extend(slot.iter());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mandatory_flag_rederived_from_type() {
        let mut page: Page = serde_json::from_value(json!({
            "id": "p1",
            "type": "store_selection",
            "isMandatory": false
        }))
        .unwrap();
        assert!(!page.is_mandatory);
        page.normalize();
        assert!(page.is_mandatory);
    }

    #[test]
    fn landing_is_not_mandatory_even_if_stored_true() {
        let mut page: Page = serde_json::from_value(json!({
            "id": "p1",
            "type": "landing",
            "isMandatory": true
        }))
        .unwrap();
        page.normalize();
        assert!(!page.is_mandatory);
    }

    #[test]
    fn sections_sort_by_order_not_position() {
        let page: Page = serde_json::from_value(json!({
            "id": "p1",
            "type": "landing",
            "sections": [
                {"id": "b", "type": "text", "order": 5},
                {"id": "a", "type": "text", "order": 1},
                {"id": "c", "type": "image", "order": 3}
            ]
        }))
        .unwrap();
        let ids: Vec<&str> = page
            .sorted_sections()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn lenient_decode_of_sparse_page() {
        // Partially-migrated records omit most fields; only id and type are
        // required for a page to be usable.
        let page: Page =
            serde_json::from_value(json!({"id": "p", "type": "thank_you"})).unwrap();
        assert_eq!(page.sections.len(), 0);
        assert_eq!(page.order, 0);
    }

    #[test]
    fn duplicate_section_id_inside_column_slot_is_rejected() {
        let doc: FlowDocument = serde_json::from_value(json!({
            "pages": [{
                "id": "p1",
                "type": "landing",
                "sections": [
                    {"id": "s1", "type": "text", "order": 0},
                    {
                        "id": "cols", "type": "columns", "order": 1,
                        "children": [
                            [{"id": "s1", "type": "text", "order": 0}],
                            []
                        ]
                    }
                ]
            }]
        }))
        .unwrap();
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::DuplicateSectionId { .. })
        ));
    }
}
