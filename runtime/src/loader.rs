//! Loader boundary traits
//!
//! The two async boundaries of the runtime: fetching the raw flow record
//! plus campaign context, and fetching a referenced design template.
//! Implementations live outside this crate.

use async_trait::async_trait;
use thiserror::Error;
use veriflow_core::render::CampaignContext;
use veriflow_core::resolve::FlowRecord;
use veriflow_core::style::TemplateConfig;

/// How a customer session addresses its flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowRef {
    Campaign(String),
    Flow(String),
    Session(String),
}

/// What the document loader returns on success.
#[derive(Debug, Clone, Default)]
pub struct FlowBundle {
    pub record: FlowRecord,
    pub campaign: CampaignContext,
}

/// Load failures are fatal to the session; the host surfaces a full-screen
/// error state and does not retry automatically.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("flow not found")]
    NotFound,

    #[error("network failure: {0}")]
    Network(String),
}

#[async_trait]
pub trait FlowLoader: Send + Sync {
    async fn load_flow(&self, flow_ref: &FlowRef) -> Result<FlowBundle, LoadError>;
}

#[async_trait]
pub trait TemplateLoader: Send + Sync {
    /// `Ok(None)` means the template simply does not exist; an `Err` is
    /// recovered by the host falling back to default tokens.
    async fn load_template(&self, template_id: &str) -> Result<Option<TemplateConfig>, LoadError>;
}

/// Template loader for hosts that never resolve templates (tests, previews
/// with locked tokens).
pub struct NoTemplates;

#[async_trait]
impl TemplateLoader for NoTemplates {
    async fn load_template(&self, _template_id: &str) -> Result<Option<TemplateConfig>, LoadError> {
        Ok(None)
    }
}
