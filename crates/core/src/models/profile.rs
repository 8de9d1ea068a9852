//! The owner's profile: a singleton document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Social platform name → URL. No key is required.
pub type Socials = BTreeMap<String, String>;

pub const SOCIAL_INSTAGRAM: &str = "instagram";
pub const SOCIAL_VIMEO: &str = "vimeo";
pub const SOCIAL_LINKEDIN: &str = "linkedin";
pub const SOCIAL_YOUTUBE: &str = "youtube";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub email: String,
    /// Showreel / background loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_video_url: Option<String>,
    #[serde(default)]
    pub socials: Socials,
}

impl Profile {
    /// Overlay the top-level fields of a stored document onto `base`.
    ///
    /// Keys present in `document` replace the matching field of `base`
    /// wholesale (so `socials` is replaced, not merged key by key). `null`
    /// values and keys the profile does not know are ignored. A document
    /// that is not a JSON object leaves `base` unchanged.
    pub fn merge_document(
        base: &Profile,
        document: serde_json::Value,
    ) -> Result<Profile, serde_json::Error> {
        let serde_json::Value::Object(overlay) = document else {
            return Ok(base.clone());
        };

        let mut merged = match serde_json::to_value(base)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for (key, value) in overlay {
            if !value.is_null() {
                merged.insert(key, value);
            }
        }

        serde_json::from_value(serde_json::Value::Object(merged))
    }
}
