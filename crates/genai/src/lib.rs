//! Best-effort project description drafting via a hosted text model.
//!
//! - [`api`] -- REST client for the `generateContent` endpoint.
//! - [`prompt`] -- the description prompt template.
//! - [`writer`] -- [`DescriptionWriter`], which never fails: missing
//!   credentials and provider errors turn into fixed messages.

pub mod api;
pub mod config;
pub mod prompt;
pub mod writer;

pub use api::{GenAiError, GeminiApi, TextGenerator};
pub use config::GenAiConfig;
pub use writer::DescriptionWriter;
