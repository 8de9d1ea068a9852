//! Best-effort description drafting.

use std::sync::Arc;

use crate::api::{GeminiApi, TextGenerator};
use crate::config::GenAiConfig;
use crate::prompt::description_prompt;

/// Returned when no API credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Vui lòng cấu hình API Key để sử dụng tính năng AI.";
/// Returned when the provider call fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Không thể tạo nội dung tự động lúc này.";

/// Drafts project descriptions. Never returns an error.
#[derive(Clone)]
pub struct DescriptionWriter {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl DescriptionWriter {
    /// Build from configuration; without an API key the writer is disabled.
    pub fn from_config(config: &GenAiConfig) -> Self {
        let generator = config.api_key.as_ref().and_then(|key| {
            match GeminiApi::new(config.base_url.clone(), key.clone()) {
                Ok(api) => Some(Arc::new(api) as Arc<dyn TextGenerator>),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build text-generation client");
                    None
                }
            }
        });
        Self {
            generator,
            model: config.model.clone(),
        }
    }

    /// Use a specific generator (tests, alternative providers).
    pub fn with_generator(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
        }
    }

    /// A writer that only ever answers with the configuration message.
    pub fn disabled() -> Self {
        Self {
            generator: None,
            model: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Draft a description for `title` using comma-joined `keywords`.
    ///
    /// - no credential: [`MISSING_CREDENTIAL_MESSAGE`], no network call;
    /// - blank title: empty string, no network call;
    /// - provider gave no text: empty string;
    /// - provider error: [`GENERATION_FAILED_MESSAGE`].
    pub async fn generate_description(&self, title: &str, keywords: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_CREDENTIAL_MESSAGE.to_string();
        };
        if title.trim().is_empty() {
            return String::new();
        }

        let prompt = description_prompt(title, keywords);
        match generator.generate(&self.model, &prompt).await {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "Text generation failed");
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::GenAiError;

    /// Records calls and answers with a fixed result.
    struct Scripted {
        calls: AtomicUsize,
        answer: fn() -> Result<Option<String>, GenAiError>,
    }

    impl Scripted {
        fn new(answer: fn() -> Result<Option<String>, GenAiError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                answer,
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<Option<String>, GenAiError> {
            assert!(prompt.contains("Tên dự án:"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)()
        }
    }

    #[tokio::test]
    async fn missing_credential_returns_config_message() {
        let writer = DescriptionWriter::from_config(&GenAiConfig::default());
        assert!(!writer.is_enabled());
        assert_eq!(
            writer.generate_description("Reel", "Editing").await,
            MISSING_CREDENTIAL_MESSAGE
        );
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let gen = Scripted::new(|| Ok(Some("Mô tả.".to_string())));
        let writer = DescriptionWriter::with_generator(gen.clone(), "m");
        assert_eq!(writer.generate_description("Reel", "VFX").await, "Mô tả.");
        assert_eq!(gen.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_answer_is_empty_string() {
        let writer = DescriptionWriter::with_generator(Scripted::new(|| Ok(None)), "m");
        assert_eq!(writer.generate_description("Reel", "").await, "");
    }

    #[tokio::test]
    async fn provider_error_becomes_fallback_text() {
        let writer = DescriptionWriter::with_generator(
            Scripted::new(|| {
                Err(GenAiError::Api {
                    status: 500,
                    body: "boom".into(),
                })
            }),
            "m",
        );
        assert_eq!(
            writer.generate_description("Reel", "VFX").await,
            GENERATION_FAILED_MESSAGE
        );
    }

    #[tokio::test]
    async fn blank_title_skips_the_call() {
        let gen = Scripted::new(|| Ok(Some("unused".to_string())));
        let writer = DescriptionWriter::with_generator(gen.clone(), "m");
        assert_eq!(writer.generate_description("  ", "VFX").await, "");
        assert_eq!(gen.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_provider_becomes_fallback_text() {
        let config = GenAiConfig {
            api_key: Some("test-key".into()),
            model: "m".into(),
            base_url: "http://127.0.0.1:1".into(),
        };
        let writer = DescriptionWriter::from_config(&config);
        assert!(writer.is_enabled());
        assert_eq!(
            writer.generate_description("Reel", "VFX").await,
            GENERATION_FAILED_MESSAGE
        );
    }
}
