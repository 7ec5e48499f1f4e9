use thiserror::Error;

/// Structural faults in a flow document. These come out of explicit
/// validation, never out of decoding: historical records decode leniently.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("duplicate page id `{0}`")]
    DuplicatePageId(String),

    #[error("duplicate section id `{section}` on page `{page}`")]
    DuplicateSectionId { page: String, section: String },
}

/// Per-section render failures. These never escape the registry boundary;
/// they become an error placeholder node for the one offending section.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid config for section `{section}`: {message}")]
    InvalidConfig { section: String, message: String },

    #[error("renderer failed for section `{section}`: {message}")]
    Failed { section: String, message: String },
}

impl RenderError {
    pub fn invalid_config(section: &str, err: impl std::fmt::Display) -> Self {
        RenderError::InvalidConfig {
            section: section.to_string(),
            message: err.to_string(),
        }
    }

    pub fn failed(section: &str, err: impl std::fmt::Display) -> Self {
        RenderError::Failed {
            section: section.to_string(),
            message: err.to_string(),
        }
    }
}
