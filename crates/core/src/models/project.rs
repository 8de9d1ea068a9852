//! Project and sub-project records.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::DocId;

/// Title given to a freshly created project.
pub const NEW_PROJECT_TITLE: &str = "New Project";
/// Category given to a freshly created project.
pub const NEW_PROJECT_CATEGORY: &str = "Video";
/// Placeholder thumbnail for a freshly created project.
pub const NEW_PROJECT_THUMBNAIL: &str = "https://picsum.photos/800/600";
/// Title given to a freshly added sub-project.
pub const NEW_SUB_PROJECT_TITLE: &str = "New Cut";

/// One portfolio entry.
///
/// Every field defaults when missing or of the wrong type, so a partially
/// written or hand-edited document is still readable. `year` is free-form
/// text; see [`parse_year`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "default_on_error")]
    pub id: DocId,
    #[serde(deserialize_with = "default_on_error")]
    pub title: String,
    #[serde(deserialize_with = "default_on_error")]
    pub client: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(deserialize_with = "default_on_error")]
    pub category: String,
    #[serde(deserialize_with = "default_on_error")]
    pub thumbnail: String,
    #[serde(deserialize_with = "default_on_error")]
    pub description: String,
    #[serde(deserialize_with = "default_on_error")]
    pub sub_projects: Vec<SubProject>,
    #[serde(deserialize_with = "default_on_error")]
    pub tags: Vec<String>,
}

/// A clip owned by its parent [`Project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubProject {
    #[serde(deserialize_with = "default_on_error")]
    pub id: DocId,
    #[serde(deserialize_with = "default_on_error")]
    pub title: String,
    /// Embeddable platform link, arbitrary external URL, or empty.
    #[serde(deserialize_with = "default_on_error")]
    pub video_url: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "default_on_error"
    )]
    pub description: Option<String>,
}

impl Project {
    /// Build the blank project the admin panel starts from.
    pub fn template(id: DocId, year: i32) -> Self {
        Self {
            id,
            title: NEW_PROJECT_TITLE.to_string(),
            client: String::new(),
            year: year.to_string(),
            category: NEW_PROJECT_CATEGORY.to_string(),
            thumbnail: NEW_PROJECT_THUMBNAIL.to_string(),
            description: String::new(),
            sub_projects: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Tags joined the way the description prompt expects them.
    pub fn keywords(&self) -> String {
        self.tags.join(", ")
    }

    /// Numeric year used for ordering, if the text parses as one.
    pub fn numeric_year(&self) -> Option<i64> {
        parse_year(&self.year)
    }
}

impl SubProject {
    pub fn template(id: DocId) -> Self {
        Self {
            id,
            title: NEW_SUB_PROJECT_TITLE.to_string(),
            video_url: String::new(),
            description: None,
        }
    }
}

/// Parse a year the lenient way: leading whitespace is skipped, an optional
/// sign is honoured and parsing stops at the first non-digit.
///
/// ```
/// use folio_core::models::project::parse_year;
///
/// assert_eq!(parse_year("2023"), Some(2023));
/// assert_eq!(parse_year("  2021 (re-edit)"), Some(2021));
/// assert_eq!(parse_year("TBA"), None);
/// ```
pub fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Order two projects by numeric year, newest first.
///
/// Years that do not parse sort after every numeric year and compare equal
/// to each other, so a stable sort keeps their store order.
pub fn compare_year_desc(a: &Project, b: &Project) -> Ordering {
    match (a.numeric_year(), b.numeric_year()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort by year descending.
pub fn sort_by_year_desc(projects: &mut [Project]) {
    projects.sort_by(compare_year_desc);
}

/// Accept `"2023"` as well as `2023` for text fields that older documents
/// stored as numbers. `null` becomes an empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Read any JSON value and fall back to the field's default when it does not
/// have the expected shape. A malformed list is dropped as a whole.
fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
