//! Response entities of the bookmarks API.
//!
//! Fields missing from a response fall back to their defaults; the server
//! omits several of them for some bookmark types.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Envelope returned by `bookmarks/list`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookmarkCollectionResponse {
    pub user: User,
    pub bookmarks: Vec<Bookmark>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "flag")]
    pub subscription_is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    pub bookmark_id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<Tag>,
    /// Reading progress, 0.0 to 1.0.
    pub progress: f64,
    pub progress_timestamp: i64,
    /// Creation time, Unix seconds.
    pub time: i64,
    #[serde(deserialize_with = "flag")]
    pub starred: bool,
    /// Source type, e.g. `bookmark`.
    #[serde(rename = "type")]
    pub kind: String,
    pub hash: String,
    pub private_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub count: i64,
    pub hash: String,
    pub time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub highlight_id: i64,
    pub bookmark_id: i64,
    pub text: String,
    pub note: Option<String>,
    pub time: i64,
    pub position: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The API sends booleans as `"0"`/`"1"`; accept real booleans and numbers too.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i != 0,
        Some(Flag::Str(s)) => matches!(s.trim(), "1" | "true"),
        None => false,
    })
}

/// Count how often each tag name is used across `bookmarks`.
///
/// Sorted by count descending, then by name so ties are stable.
pub fn tag_counts(bookmarks: &[Bookmark]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in bookmarks.iter().flat_map(|b| b.tags.iter()) {
        *counts.entry(tag.name.as_str()).or_default() += 1;
    }
    let mut counts = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_RESPONSE: &str = r#"{
        "highlights": [],
        "bookmarks": [
            {
                "hash": "jxUYkPeE",
                "description": "",
                "tags": [
                    {"count": 3, "hash": "aa", "name": "rust", "id": 11, "time": 1700000000.5, "slug": "rust"}
                ],
                "bookmark_id": 1234567,
                "private_source": "",
                "title": "Reading list",
                "url": "https://example.test/article",
                "progress_timestamp": 1700000100,
                "time": 1700000000,
                "progress": 0.25,
                "starred": "1",
                "type": "bookmark"
            }
        ],
        "user": {
            "username": "jane@example.test",
            "user_id": 42,
            "type": "user",
            "subscription_is_active": "1"
        }
    }"#;

    #[test]
    fn decode_list_envelope() {
        let response: BookmarkCollectionResponse = serde_json::from_str(LIST_RESPONSE).unwrap();
        assert_eq!(response.user.username, "jane@example.test");
        assert_eq!(response.user.user_id, 42);
        assert!(response.user.subscription_is_active);
        assert!(response.highlights.is_empty());

        let bookmark = &response.bookmarks[0];
        assert_eq!(bookmark.bookmark_id, 1234567);
        assert_eq!(bookmark.title, "Reading list");
        assert_eq!(bookmark.url, "https://example.test/article");
        assert_eq!(bookmark.progress, 0.25);
        assert_eq!(bookmark.progress_timestamp, 1700000100);
        assert!(bookmark.starred);
        assert_eq!(bookmark.kind, "bookmark");
        assert_eq!(bookmark.tags[0].name, "rust");
        assert_eq!(bookmark.tags[0].slug, "rust");
        assert_eq!(bookmark.tags[0].count, 3);
        assert_eq!(bookmark.tags[0].id, 11);
    }

    #[test]
    fn missing_fields_default() {
        let bookmark: Bookmark = serde_json::from_str(r#"{"bookmark_id": 1, "title": "t"}"#).unwrap();
        assert_eq!(bookmark.bookmark_id, 1);
        assert!(bookmark.tags.is_empty());
        assert!(!bookmark.starred);
        assert_eq!(bookmark.progress, 0.0);
    }

    #[test]
    fn starred_flag_variants() {
        for (raw, expected) in [
            (r#""0""#, false),
            (r#""1""#, true),
            ("true", true),
            ("false", false),
            ("1", true),
            ("0", false),
            ("null", false),
        ] {
            let json = format!(r#"{{"starred": {}}}"#, raw);
            let bookmark: Bookmark = serde_json::from_str(&json).unwrap();
            assert_eq!(bookmark.starred, expected, "starred = {}", raw);
        }
    }

    #[test]
    fn highlight_note_may_be_null() {
        let highlight: Highlight = serde_json::from_str(
            r#"{"highlight_id": 9, "text": "quote", "note": null, "bookmark_id": 1,
                "time": 1700000000, "position": 0, "type": "highlight"}"#,
        )
        .unwrap();
        assert_eq!(highlight.note, None);
        assert_eq!(highlight.text, "quote");
    }

    fn tagged(names: &[&str]) -> Bookmark {
        Bookmark {
            tags: names
                .iter()
                .map(|name| Tag {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn tag_counts_sorted_by_usage() {
        let bookmarks = vec![
            tagged(&["rust", "web"]),
            tagged(&["rust"]),
            tagged(&["books", "web", "rust"]),
            tagged(&[]),
        ];
        assert_eq!(
            tag_counts(&bookmarks),
            vec![
                ("rust".to_string(), 3),
                ("web".to_string(), 2),
                ("books".to_string(), 1),
            ]
        );
    }
}
