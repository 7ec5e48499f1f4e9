//! veriflow-core
//!
//! Document model, section dispatch and resolution engine for multi-page
//! verification flows. Protocol- and UI-agnostic: the render tree is plain
//! data, hosts decide how to paint it.

pub mod catalog;
pub mod document;
pub mod error;
pub mod navigation;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod style;
pub mod telemetry;

pub mod prelude {
    pub use crate::catalog::{SectionKind, parse_config, tags};
    pub use crate::document::{FlowDocument, Page, PageType, Section};
    pub use crate::error::{DocumentError, RenderError};
    pub use crate::navigation::{NavTarget, NavigationController};
    pub use crate::registry::{SectionRegistry, SectionRenderer};
    pub use crate::render::{
        ApprovedStore, CampaignContext, InputBag, NavigationHandle, RenderContext, RenderedNode,
    };
    pub use crate::resolve::{
        EmptyReason, FlowConfig, FlowRecord, PublishedSnapshot, ResolvedPageSet, SourceMode,
        SourcePolicy, resolve, resolve_with_policy,
    };
    pub use crate::style::{StyleTokenSet, TemplateConfig, resolve_tokens};
}

pub use prelude::*;
