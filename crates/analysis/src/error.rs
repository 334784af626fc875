use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Empty response from AI model")]
    EmptyResponse,

    #[error("{0}")]
    Upstream(String),

    #[error("Failed to parse analysis response: {message}")]
    Parse { message: String, raw: String },
}

impl AnalysisError {
    /// Wrap a model-client failure, keeping the whole context chain in the message.
    pub fn upstream(err: anyhow::Error) -> Self {
        Self::Upstream(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
