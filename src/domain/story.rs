//! Story, item and comment models decoded from the HN search API.
//!
//! The search endpoint returns `{ "hits": [...] }` where each hit carries at least
//! `objectID` and `title`; everything else is optional and defaulted. The items
//! endpoint returns one story with its full comment tree under `children`.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A single ranked hit from `/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
}

impl StoryHit {
    /// Builds a bare hit with only the fields the search controller needs.
    #[must_use]
    pub fn new(object_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            title: title.into(),
            url: None,
            points: None,
            author: None,
            num_comments: None,
            created_at_i: None,
        }
    }

    /// Formats the listing meta line, e.g. `"42 points • 7 comments • by pg • 3h ago"`.
    #[must_use]
    pub fn meta_line(&self) -> String {
        let mut line = format!(
            "{} points • {} comments • by {}",
            self.points.unwrap_or(0),
            self.num_comments.unwrap_or(0),
            self.author.as_deref().unwrap_or("unknown"),
        );
        if let Some(created) = self.created_at_i {
            line.push_str(" • ");
            line.push_str(&time_ago(created));
        }
        line
    }
}

/// Algolia sends `"title": null` for some hits; treat it like an absent title.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by `/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<StoryHit>,
}

/// A story returned by `/items/{id}`, including its comment tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Item {
    /// Total number of comments in the tree, at every depth.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.children.iter().map(Comment::subtree_size).sum()
    }
}

/// One node in an item's comment tree.
///
/// Deleted comments come back with `author` and `text` set to `null` but may still
/// have live replies, so both are optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Comment {
    fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_size).sum::<usize>()
    }
}

/// Returns a human-readable string describing how long ago `timestamp` was.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - Otherwise: "Xd ago"
#[must_use]
pub fn time_ago(timestamp: i64) -> String {
    let diff = chrono::Utc::now().timestamp() - timestamp;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}
