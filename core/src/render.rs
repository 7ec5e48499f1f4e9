//! Render tree and render context
//!
//! Renderers produce `RenderedNode` values; they never touch shared state
//! directly. Everything they may want to change (navigation, user input) is
//! signalled through handles on the `RenderContext` and applied by the host.

use crate::navigation::NavTarget;
use crate::style::StyleTokenSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Output of one section render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderedNode {
    /// A normally rendered section.
    Element {
        id: String,
        tag: String,
        props: Value,
        #[serde(default)]
        children: Vec<RenderedNode>,
    },
    /// Placeholder for a tag no renderer is registered for.
    Unknown { id: String, tag: String },
    /// Placeholder substituted by the per-instance failure boundary.
    Error {
        id: String,
        tag: String,
        message: String,
    },
    /// Labeled no-content state emitted when resolution finds no pages.
    EmptyState { label: String },
}

impl RenderedNode {
    pub fn element(id: &str, tag: &str, props: Value) -> Self {
        RenderedNode::Element {
            id: id.to_string(),
            tag: tag.to_string(),
            props,
            children: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RenderedNode::Error { .. })
    }
}

/// A retail location approved to sell the campaign's product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovedStore {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Campaign-level context supplied by the document loader alongside the
/// flow record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignContext {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub approved_stores: Vec<ApprovedStore>,
    /// Campaign-level style overrides, highest layer of the token cascade.
    #[serde(default)]
    pub locked_design_tokens: Option<Value>,
}

/// Transient user input collected while the customer walks the flow
/// (purchase channel, selected store, account fields).
///
/// Renderers request writes through this handle; nothing downstream of the
/// registry mutates the document itself.
#[derive(Clone, Default)]
pub struct InputBag {
    values: Arc<Mutex<serde_json::Map<String, Value>>>,
}

impl InputBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.values.lock().insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.values.lock().clone())
    }
}

impl std::fmt::Debug for InputBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBag")
            .field("keys", &self.values.lock().len())
            .finish()
    }
}

/// The `navigate(target)` callback handed to every renderer.
///
/// Intents are queued, not applied: the host drains the queue after the
/// render pass and feeds each target to the navigation controller. A
/// navigation request therefore never waits on anything.
#[derive(Clone, Default)]
pub struct NavigationHandle {
    queue: Arc<Mutex<Vec<NavTarget>>>,
}

impl NavigationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self, target: NavTarget) {
        self.queue.lock().push(target);
    }

    pub fn request_raw(&self, raw: &str) {
        self.request(NavTarget::parse(raw));
    }

    pub fn drain(&self) -> Vec<NavTarget> {
        std::mem::take(&mut *self.queue.lock())
    }
}

impl std::fmt::Debug for NavigationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationHandle")
            .field("pending", &self.queue.lock().len())
            .finish()
    }
}

/// Everything a renderer may read for one section instance.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub stores: Vec<ApprovedStore>,
    pub inputs: InputBag,
    /// Tri-state verification outcome: unknown / genuine / counterfeit.
    pub is_authentic: Option<bool>,
    pub navigator: NavigationHandle,
    pub tokens: StyleTokenSet,
    /// Free-form settings of the page being rendered (e.g. `authConfig`).
    pub page_settings: Value,
    /// Opt-in verbose dispatch tracing. Diagnostic only; must never affect
    /// render output.
    pub trace: bool,
}

impl RenderContext {
    pub fn new(tokens: StyleTokenSet) -> Self {
        RenderContext {
            stores: Vec::new(),
            inputs: InputBag::new(),
            is_authentic: None,
            navigator: NavigationHandle::new(),
            tokens,
            page_settings: Value::Object(Default::default()),
            trace: false,
        }
    }

    pub fn with_campaign(mut self, campaign: &CampaignContext) -> Self {
        self.stores = campaign.approved_stores.clone();
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(StyleTokenSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_handle_queues_and_drains() {
        let handle = NavigationHandle::new();
        handle.request_raw("next");
        handle.request_raw("p-42");
        let drained = handle.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], NavTarget::Next);
        assert_eq!(drained[1], NavTarget::Page("p-42".to_string()));
        assert!(handle.drain().is_empty());
    }

    #[test]
    fn input_bag_is_shared_across_clones() {
        let bag = InputBag::new();
        let alias = bag.clone();
        alias.set("purchase_channel", serde_json::json!("in_store"));
        assert_eq!(
            bag.get("purchase_channel"),
            Some(serde_json::json!("in_store"))
        );
    }
}
