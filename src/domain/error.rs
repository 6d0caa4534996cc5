use std::fmt;

use thiserror::Error;

/// Pipeline stage in which a quote assembly failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Loading,
    Retrieving,
    Planning,
    Structuring,
    Reconciling,
    Done,
}

impl AssemblyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblyStage::Loading => "loading",
            AssemblyStage::Retrieving => "retrieving",
            AssemblyStage::Planning => "planning",
            AssemblyStage::Structuring => "structuring",
            AssemblyStage::Reconciling => "reconciling",
            AssemblyStage::Done => "done",
        }
    }
}

impl fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The model answered, but not with what was asked for. `raw` keeps the
    /// model text so the failure can be diagnosed without another call.
    #[error("Model output error: {message}")]
    ModelOutput { message: String, raw: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Quote assembly failed at {stage} stage: {source}")]
    Stage {
        stage: AssemblyStage,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn model_output(msg: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::ModelOutput {
            message: msg.into(),
            raw: raw.into(),
        }
    }

    /// The payload was located but could not be parsed into the expected shape.
    pub fn invalid_structured_data(err: impl fmt::Display, raw: impl Into<String>) -> Self {
        Self::model_output(
            format!("model returned invalid structured data: {err}"),
            raw,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn at_stage(self, stage: AssemblyStage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through stage wrappers.
    pub fn root(&self) -> &DomainError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn stage(&self) -> Option<AssemblyStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    pub fn is_model_output(&self) -> bool {
        matches!(self.root(), Self::ModelOutput { .. })
    }

    /// Failures caused by the upstream LLM provider rather than by this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self.root(),
            Self::Auth(_) | Self::Transport(_) | Self::ModelOutput { .. }
        )
    }

    /// Raw model text attached to a model-output failure, if any.
    pub fn raw_model_text(&self) -> Option<&str> {
        match self.root() {
            Self::ModelOutput { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wrapper_keeps_root_cause() {
        let err = DomainError::model_output("no JSON found", "just prose")
            .at_stage(AssemblyStage::Structuring);

        assert_eq!(err.stage(), Some(AssemblyStage::Structuring));
        assert!(err.is_model_output());
        assert!(err.is_upstream());
        assert_eq!(err.raw_model_text(), Some("just prose"));
        assert!(err.to_string().contains("structuring"));
    }

    #[test]
    fn not_found_is_not_upstream() {
        let err = DomainError::not_found("nothing").at_stage(AssemblyStage::Retrieving);
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
        assert_eq!(err.raw_model_text(), None);
    }
}
