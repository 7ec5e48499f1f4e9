//! veriflow-authoring
//!
//! The authoring side of the flow document: structural mutation rules and
//! the save/publish pipeline. Single-writer: one editor owns one working
//! copy; the external store serializes concurrent saves.

pub mod editor;
pub mod publish;

pub use editor::{FlowEditor, InsertAt, PolicyError};
pub use publish::{
    FlowDraft, NothingToPublish, PersistenceSink, SaveError, draft_from_document, publish,
};
