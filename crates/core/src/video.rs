//! Video reference handling for clips and the showreel.
//!
//! A reference containing `youtube` or `vimeo` is treated as an embeddable
//! platform link; any other non-empty value is an external link.

use serde::Serialize;

/// How a clip should be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoPlayer {
    /// Inline iframe with the given source.
    Embed { src: String },
    /// Plain outbound link.
    External { href: String },
    /// Nothing to play.
    None,
}

pub fn is_embeddable(url: &str) -> bool {
    url.contains("youtube") || url.contains("vimeo")
}

/// Rewrite a watch link into its embed form and drop extra query parameters.
///
/// ```
/// use folio_core::video::embed_url;
///
/// assert_eq!(
///     embed_url("https://www.youtube.com/watch?v=abc123&t=42"),
///     "https://www.youtube.com/embed/abc123"
/// );
/// ```
pub fn embed_url(url: &str) -> String {
    let rewritten = url.replace("watch?v=", "embed/");
    rewritten.split('&').next().unwrap_or_default().to_string()
}

/// Embed URL for the full-screen showreel player, which starts playing on open.
pub fn autoplay_embed_url(url: &str) -> String {
    format!("{}?autoplay=1", embed_url(url))
}

pub fn player_for(url: &str) -> VideoPlayer {
    let url = url.trim();
    if url.is_empty() {
        VideoPlayer::None
    } else if is_embeddable(url) {
        VideoPlayer::Embed {
            src: embed_url(url),
        }
    } else {
        VideoPlayer::External {
            href: url.to_string(),
        }
    }
}
