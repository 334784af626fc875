use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LENGTH: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    /// grammar, tone, plagiarism, style, ... (not validated)
    pub analysis_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Missing means the default cap; an explicit `null` means no cap.
    #[serde(default = "default_max_length")]
    pub max_length: Option<u32>,
}

fn default_max_length() -> Option<u32> {
    Some(DEFAULT_MAX_LENGTH)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub suggestions: Vec<String>,
    pub score: f64,
    pub details: AnalysisDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub raw_analysis: String,
    pub suggestions_count: usize,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub generated_text: String,
}

/// Options forwarded to the model provider with a prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub max_output_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn with_max_output_tokens(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens: Some(max_output_tokens),
        }
    }
}
