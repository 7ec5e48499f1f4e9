//! Save and publish pipeline
//!
//! Saving writes the draft through the external sink; publishing copies the
//! draft page list into the published snapshot with an incremented version
//! and a timestamp. Runtime sessions resolve against the snapshot value, so
//! the swap is atomic from their point of view: they either see the old
//! snapshot or the new one, never a half-written document.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use veriflow_core::document::FlowDocument;
use veriflow_core::resolve::{FlowConfig, FlowRecord, PublishedSnapshot};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("persistence rejected the draft: {0}")]
    Rejected(String),

    #[error("network failure: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
#[error("nothing to publish: the draft has no pages")]
pub struct NothingToPublish;

/// The payload handed to the external persistence sink on explicit save.
#[derive(Debug, Clone)]
pub struct FlowDraft {
    pub name: String,
    pub flow_config: FlowConfig,
}

#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn save_flow(&self, flow_id: &str, draft: &FlowDraft) -> Result<(), SaveError>;
}

/// Turn an edited document into the draft envelope the sink persists.
pub fn draft_from_document(name: &str, doc: &FlowDocument) -> FlowDraft {
    let pages = doc
        .pages
        .iter()
        .filter_map(|p| serde_json::to_value(p).ok())
        .collect();
    FlowDraft {
        name: name.to_string(),
        flow_config: FlowConfig {
            pages: Some(pages),
            sections: None,
            theme: doc.theme.clone(),
            global_header: doc.global_header.clone(),
            footer: doc.footer.clone(),
            design_template_id: doc.design_template_id.clone(),
        },
    }
}

/// Publish: copy the draft pages into the published snapshot, bumping the
/// version counter and stamping the publish time.
pub fn publish(record: &mut FlowRecord) -> Result<u64, NothingToPublish> {
    let pages = record
        .flow_config
        .as_ref()
        .and_then(|c| c.pages.clone())
        .filter(|p| !p.is_empty())
        .ok_or(NothingToPublish)?;

    let version = record
        .published_snapshot
        .as_ref()
        .map(|s| s.version)
        .unwrap_or(0)
        + 1;

    record.published_snapshot = Some(PublishedSnapshot {
        pages,
        version,
        published_at: Some(Utc::now()),
    });
    tracing::info!(version, "flow published");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veriflow_core::resolve::{SourceMode, resolve};

    fn draft_record() -> FlowRecord {
        serde_json::from_value(json!({
            "flow_config": {"pages": [
                {"id": "p1", "type": "landing", "order": 0},
                {"id": "p2", "type": "thank_you", "order": 1}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn publish_bumps_version_and_freezes_pages() {
        let mut record = draft_record();
        assert_eq!(resolve(&record).source, SourceMode::Draft);

        let version = publish(&mut record).unwrap();
        assert_eq!(version, 1);
        let resolved = resolve(&record);
        assert_eq!(resolved.source, SourceMode::Published);
        assert_eq!(resolved.pages.len(), 2);
        assert!(record.published_snapshot.as_ref().unwrap().published_at.is_some());

        // Republishing increments again.
        assert_eq!(publish(&mut record).unwrap(), 2);
    }

    #[test]
    fn publishing_an_empty_draft_is_rejected() {
        let mut record = FlowRecord::default();
        assert!(publish(&mut record).is_err());

        record.flow_config = Some(FlowConfig {
            pages: Some(vec![]),
            ..Default::default()
        });
        assert!(publish(&mut record).is_err());
    }

    struct RecordingSink {
        saved: parking_lot::Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl PersistenceSink for RecordingSink {
        async fn save_flow(&self, flow_id: &str, draft: &FlowDraft) -> Result<(), SaveError> {
            self.saved
                .lock()
                .push((flow_id.to_string(), draft.name.clone()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn explicit_save_goes_through_the_sink() {
        use veriflow_core::document::{FlowDocument, Page, PageType};
        let mut doc = FlowDocument::default();
        doc.pages.push(Page::new(PageType::Landing, 0));

        let sink = RecordingSink {
            saved: parking_lot::Mutex::new(Vec::new()),
        };
        let draft = draft_from_document("Spring flow", &doc);
        sink.save_flow("flow-7", &draft).await.unwrap();

        let saved = sink.saved.lock();
        assert_eq!(saved.as_slice(), &[("flow-7".to_string(), "Spring flow".to_string())]);
    }

    #[test]
    fn draft_round_trips_through_the_envelope() {
        use veriflow_core::document::{FlowDocument, Page, PageType};
        let mut doc = FlowDocument::default();
        doc.pages.push(Page::new(PageType::Landing, 0));
        doc.pages.push(Page::new(PageType::ThankYou, 1));

        let draft = draft_from_document("Spring flow", &doc);
        let record = FlowRecord {
            flow_config: Some(draft.flow_config),
            ..Default::default()
        };
        let resolved = resolve(&record);
        assert_eq!(resolved.source, SourceMode::Draft);
        assert_eq!(resolved.pages.len(), 2);
    }
}
