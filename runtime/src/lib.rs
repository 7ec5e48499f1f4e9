//! veriflow-runtime
//!
//! The customer-facing runtime: loader boundaries and the host state
//! machine that turns a raw flow record into rendered pages.

pub mod host;
pub mod loader;

pub use host::{HostState, RequestToken, RuntimeHost};
pub use loader::{FlowBundle, FlowLoader, FlowRef, LoadError, NoTemplates, TemplateLoader};
