pub mod error;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod schema;

pub use error::AnalysisError;
pub use llm::{GeminiClient, TextModel};
pub use parser::parse_analysis_response;
pub use schema::{
    AnalysisDetails, AnalysisRequest, AnalysisResult, GenerationOptions, GenerationRequest,
    GenerationResult,
};

use std::sync::Arc;
use tracing::{error, info};

/// Builds prompts, calls the model and shapes its reply.
///
/// Holds no per-request state, so one instance is shared by every handler.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn TextModel>,
}

impl Analyzer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Analyze `text` for `analysis_type` and parse the reply.
    pub async fn analyze(&self, text: &str, analysis_type: &str) -> error::Result<AnalysisResult> {
        let prompt = prompt::build_analysis_prompt(analysis_type, text);

        info!(model = self.model_name(), "Sending analysis prompt to model");
        let reply = self
            .model
            .generate(&prompt, &GenerationOptions::default())
            .await
            .map_err(|e| {
                error!(error = %format!("{:#}", e), analysis_type, "Model call failed");
                AnalysisError::upstream(e)
            })?;

        if reply.is_empty() {
            error!(analysis_type, "Empty response from model");
            return Err(AnalysisError::EmptyResponse);
        }

        info!(reply_len = reply.len(), "Parsing model response");
        let result = parse_analysis_response(&reply).inspect_err(|e| {
            if let AnalysisError::Parse { raw, .. } = e {
                error!(error = %e, response_text = %raw, "Error parsing analysis response");
            }
        })?;

        info!(
            suggestions = result.suggestions.len(),
            score = result.score,
            "Analysis complete"
        );
        Ok(result)
    }

    /// Send `prompt` as-is, capped at `max_length` output tokens when given.
    pub async fn generate(&self, prompt: &str, max_length: Option<u32>) -> error::Result<String> {
        info!(model = self.model_name(), ?max_length, "Sending generation prompt to model");

        let options = max_length
            .map(GenerationOptions::with_max_output_tokens)
            .unwrap_or_default();
        let text = self
            .model
            .generate(prompt, &options)
            .await
            .map_err(|e| {
                error!(error = %format!("{:#}", e), "Model call failed");
                AnalysisError::upstream(e)
            })?;

        info!(generated_len = text.len(), "Generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed reply and records what it was asked.
    struct ScriptedModel {
        reply: std::result::Result<String, String>,
        calls: Mutex<Vec<(String, GenerationOptions)>>,
    }

    impl ScriptedModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn generate(
            &self,
            prompt: &str,
            options: &GenerationOptions,
        ) -> anyhow::Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), *options));
            self.reply.clone().map_err(|m| anyhow::anyhow!(m))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_analyze_sends_template_and_parses_reply() {
        let model = ScriptedModel::replying("1. Improve clarity.\n2. Add examples.\nScore: 0.5");
        let analyzer = Analyzer::new(model.clone());

        let result = analyzer.analyze("Our product is good.", "tone").await.unwrap();

        assert_eq!(result.suggestions, vec!["Improve clarity.", "Add examples."]);
        assert_eq!(result.score, 0.5);

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.starts_with("Analyze the following text for tone:"));
        assert!(calls[0].0.contains("Our product is good."));
        assert_eq!(calls[0].1, GenerationOptions::default());
    }

    #[tokio::test]
    async fn test_analyze_empty_reply() {
        let analyzer = Analyzer::new(ScriptedModel::replying(""));

        let err = analyzer.analyze("text", "grammar").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyResponse));
        assert_eq!(err.to_string(), "Empty response from AI model");
    }

    #[tokio::test]
    async fn test_analyze_whitespace_reply_is_parsed() {
        let analyzer = Analyzer::new(ScriptedModel::replying("  \n"));

        let result = analyzer.analyze("text", "grammar").await.unwrap();

        assert!(result.suggestions.is_empty());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.details.raw_analysis, "  \n");
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_keeps_message() {
        let analyzer = Analyzer::new(ScriptedModel::failing("quota exceeded"));

        let err = analyzer.analyze("text", "grammar").await.unwrap_err();

        assert!(matches!(err, AnalysisError::Upstream(_)));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_generate_passes_prompt_and_cap() {
        let model = ScriptedModel::replying("Once upon a time");
        let analyzer = Analyzer::new(model.clone());

        let text = analyzer.generate("Tell a story", Some(10)).await.unwrap();

        assert_eq!(text, "Once upon a time");
        let calls = model.calls.lock().unwrap();
        assert_eq!(calls[0].0, "Tell a story");
        assert_eq!(calls[0].1.max_output_tokens, Some(10));
    }

    #[tokio::test]
    async fn test_generate_without_cap() {
        let model = ScriptedModel::replying("Unbounded");
        let analyzer = Analyzer::new(model.clone());

        assert_eq!(analyzer.generate("x", None).await.unwrap(), "Unbounded");
        assert_eq!(model.calls.lock().unwrap()[0].1, GenerationOptions::default());
    }

    #[tokio::test]
    async fn test_generate_upstream_failure() {
        let analyzer = Analyzer::new(ScriptedModel::failing("connection reset"));

        let err = analyzer.generate("x", Some(5)).await.unwrap_err();

        assert_eq!(err.to_string(), "connection reset");
    }
}
