//! Resolution Algorithm
//!
//! Decides which page source is authoritative for a raw flow record:
//! published snapshot, live draft, ad-hoc config pages, or nothing.
//! Deterministic, pure and idempotent; the only code allowed to interpret
//! the persisted envelope.

use crate::document::{Page, PageType, Section};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The frozen, customer-visible copy of a flow's pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishedSnapshot {
    #[serde(default)]
    pub pages: Vec<Value>,
    #[serde(default)]
    pub version: u64,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The in-progress draft plus legacy fields that predate the page model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub pages: Option<Vec<Value>>,
    /// Legacy flat section list from before pages existed. Synthesized into
    /// one implicit page during resolution.
    #[serde(default)]
    pub sections: Option<Vec<Value>>,
    #[serde(default)]
    pub theme: Value,
    #[serde(default, rename = "globalHeader")]
    pub global_header: Value,
    #[serde(default)]
    pub footer: Value,
    #[serde(default, rename = "designTemplateId")]
    pub design_template_id: Option<String>,
}

/// The persisted envelope. Candidate page lists stay raw (`Value`) so that
/// falsy entries can be dropped and malformed entries skipped without
/// failing the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "publishedSnapshot")]
    pub published_snapshot: Option<PublishedSnapshot>,
    #[serde(default)]
    pub flow_config: Option<FlowConfig>,
    /// Ad-hoc top-level page list seen in freeform payloads.
    #[serde(default)]
    pub pages: Option<Vec<Value>>,
}

/// Which source produced the resolved page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    Published,
    Draft,
    Config,
    Empty,
}

/// Why resolution came up empty. Lets operators tell "needs republish"
/// apart from "needs authoring".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// A snapshot was published at some point but carries no pages.
    PublishedEmpty,
    /// Draft content exists but resolution was pinned to published sources.
    DraftUnpublished,
    /// No source contains anything.
    NothingAuthored,
}

impl EmptyReason {
    pub fn label(self) -> &'static str {
        match self {
            EmptyReason::PublishedEmpty => "Published snapshot is empty — republish required",
            EmptyReason::DraftUnpublished => "A draft exists but has not been published",
            EmptyReason::NothingAuthored => "No content authored yet",
        }
    }
}

/// Whether draft/config fallback is allowed. Live customer sessions may pin
/// to published content; the default keeps the full fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourcePolicy {
    #[default]
    Any,
    PublishedOnly,
}

/// The resolution output: an ordered, normalized page list plus the label
/// of the source that produced it. Immutable for the duration of one
/// render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPageSet {
    pub pages: Vec<Page>,
    pub source: SourceMode,
    pub empty_reason: Option<EmptyReason>,
}

impl ResolvedPageSet {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Operator-facing label for the no-content state.
    pub fn empty_label(&self) -> Option<&'static str> {
        self.empty_reason.map(EmptyReason::label)
    }
}

/// Drop falsy entries, then decode the survivors leniently. An entry that
/// is not even an object is dropped; a malformed page object is skipped
/// with a warning rather than poisoning the list.
fn decode_pages(raw: &[Value]) -> Vec<Page> {
    raw.iter()
        .filter(|v| !v.is_null() && *v != &Value::Bool(false))
        .filter_map(|v| match serde_json::from_value::<Page>(v.clone()) {
            Ok(mut page) => {
                page.normalize();
                Some(page)
            }
            Err(error) => {
                tracing::warn!(%error, "dropping undecodable page entry");
                None
            }
        })
        .collect()
}

/// Sort by the explicit `order` field; array position breaks ties.
fn order_pages(mut pages: Vec<Page>) -> Vec<Page> {
    pages.sort_by_key(|p| p.order);
    pages
}

/// Synthesize the implicit page a legacy flat section list stands for.
fn synthesize_legacy_page(sections: &[Value]) -> Page {
    let sections: Vec<Section> = sections
        .iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| match serde_json::from_value::<Section>(v.clone()) {
            Ok(section) => Some(section),
            Err(error) => {
                tracing::warn!(%error, "dropping undecodable legacy section");
                None
            }
        })
        .collect();
    Page {
        id: "main-content".to_string(),
        page_type: PageType::ContentDisplay,
        name: "Main Content".to_string(),
        sections,
        settings: Value::Object(Default::default()),
        is_mandatory: false,
        order: 0,
    }
}

/// Resolve with the default policy (full fallback chain).
pub fn resolve(record: &FlowRecord) -> ResolvedPageSet {
    resolve_with_policy(record, SourcePolicy::Any)
}

/// Evaluate the source candidates in strict priority order:
/// published → draft → config pages → empty.
pub fn resolve_with_policy(record: &FlowRecord, policy: SourcePolicy) -> ResolvedPageSet {
    if let Some(snapshot) = &record.published_snapshot {
        let pages = decode_pages(&snapshot.pages);
        if !pages.is_empty() {
            return ResolvedPageSet {
                pages: order_pages(pages),
                source: SourceMode::Published,
                empty_reason: None,
            };
        }
    }

    if policy == SourcePolicy::PublishedOnly {
        return empty_result(record, policy);
    }

    if let Some(config) = &record.flow_config {
        if let Some(raw) = &config.pages {
            let pages = decode_pages(raw);
            if !pages.is_empty() {
                return ResolvedPageSet {
                    pages: order_pages(pages),
                    source: SourceMode::Draft,
                    empty_reason: None,
                };
            }
        }
    }

    if let Some(raw) = &record.pages {
        let pages = decode_pages(raw);
        if !pages.is_empty() {
            return ResolvedPageSet {
                pages: order_pages(pages),
                source: SourceMode::Config,
                empty_reason: None,
            };
        }
    }

    // Legacy flat sections, no pages anywhere: synthesize one implicit page.
    if let Some(config) = &record.flow_config {
        if config.pages.is_none() {
            if let Some(sections) = &config.sections {
                let page = synthesize_legacy_page(sections);
                if !page.sections.is_empty() {
                    return ResolvedPageSet {
                        pages: vec![page],
                        source: SourceMode::Config,
                        empty_reason: None,
                    };
                }
            }
        }
    }

    empty_result(record, policy)
}

fn empty_result(record: &FlowRecord, policy: SourcePolicy) -> ResolvedPageSet {
    let reason = empty_reason(record, policy);
    ResolvedPageSet {
        pages: Vec::new(),
        source: SourceMode::Empty,
        empty_reason: Some(reason),
    }
}

fn has_draft_content(record: &FlowRecord) -> bool {
    let draft = record
        .flow_config
        .as_ref()
        .and_then(|c| c.pages.as_ref())
        .map(|raw| !decode_pages(raw).is_empty())
        .unwrap_or(false);
    let adhoc = record
        .pages
        .as_ref()
        .map(|raw| !decode_pages(raw).is_empty())
        .unwrap_or(false);
    draft || adhoc
}

fn empty_reason(record: &FlowRecord, policy: SourcePolicy) -> EmptyReason {
    if policy == SourcePolicy::PublishedOnly && has_draft_content(record) {
        return EmptyReason::DraftUnpublished;
    }
    let was_published = record
        .published_snapshot
        .as_ref()
        .map(|s| s.version > 0 || s.published_at.is_some())
        .unwrap_or(false);
    if was_published {
        EmptyReason::PublishedEmpty
    } else {
        EmptyReason::NothingAuthored
    }
}
