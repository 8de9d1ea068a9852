/// Default hosted model used for descriptions.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default API root of the hosted text-generation service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Text-generation settings.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// API credential. `None` disables generation.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GenAiConfig {
    /// Load settings from environment variables.
    ///
    /// | Env Var          | Default                                      |
    /// |------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY` | unset (generation disabled)                  |
    /// | `GEMINI_MODEL`   | `gemini-3-flash-preview`                     |
    /// | `GEMINI_BASE_URL`| `https://generativelanguage.googleapis.com`  |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; AI description drafting is disabled");
        }

        Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        }
    }
}
