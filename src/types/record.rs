//! Day records as supplied by the day record store

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Longest life-record content shown as a label when the title is empty
const LABEL_MAX_CHARS: usize = 50;

/// Activity filter the calendar is showing (the store's `type` query)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    Post,
    Life,
    #[default]
    All,
}

impl CalendarKind {
    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Life => "life",
            Self::All => "all",
        }
    }

    /// Whether items of `category` are part of this view
    pub fn includes(self, category: Category) -> bool {
        match self {
            Self::Post => category == Category::Post,
            Self::Life => category == Category::Life,
            Self::All => category != Category::Unknown,
        }
    }
}

/// Category of a single activity item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Post,
    Life,
    #[serde(other)]
    Unknown,
}

/// Which categories contributed to a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    #[default]
    Post,
    Life,
    Both,
    #[serde(other)]
    Unknown,
}

/// A single post or life entry contributing to a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl ActivityItem {
    /// Display label: the title, or the leading part of the content
    pub fn label(&self) -> String {
        if !self.title.is_empty() {
            return self.title.clone();
        }
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(LABEL_MAX_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Slug, treating an empty string as absent
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

/// One calendar day with activity.
///
/// `count` is expected to equal `posts.len() + life_records.len()`; the
/// store owns that invariant and it is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// `YYYY-MM-DD`, the join key against calendar dates
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: DayKind,
    #[serde(default)]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub posts: Vec<ActivityItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub life_records: Vec<ActivityItem>,
}

impl DayRecord {
    /// Parsed join key, `None` for malformed dates
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_KEY_FORMAT).ok()
    }

    /// Items of one category in display order
    pub fn items(&self, category: Category) -> &[ActivityItem] {
        match category {
            Category::Post => &self.posts,
            Category::Life => &self.life_records,
            Category::Unknown => &[],
        }
    }

    /// Whether this day should be drawn and selected as active
    pub fn has_activity(&self) -> bool {
        self.count > 0
    }
}

/// Format of the date join key
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Render a calendar date as its join key
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, content: &str) -> ActivityItem {
        ActivityItem {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            slug: None,
            category: Category::Life,
            published_at: None,
        }
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(CalendarKind::Post.as_str(), "post");
        assert_eq!(CalendarKind::Life.as_str(), "life");
        assert_eq!(CalendarKind::All.as_str(), "all");
    }

    #[test]
    fn test_kind_includes() {
        assert!(CalendarKind::Post.includes(Category::Post));
        assert!(!CalendarKind::Post.includes(Category::Life));
        assert!(CalendarKind::All.includes(Category::Life));
        assert!(!CalendarKind::All.includes(Category::Unknown));
    }

    #[test]
    fn test_label_prefers_title() {
        assert_eq!(item("Morning run", "ran 5k").label(), "Morning run");
    }

    #[test]
    fn test_label_short_content() {
        assert_eq!(item("", "ran 5k").label(), "ran 5k");
    }

    #[test]
    fn test_label_truncates_by_chars() {
        let content = "雨".repeat(60);
        let label = item("", &content).label();
        assert_eq!(label, format!("{}...", "雨".repeat(50)));
    }

    #[test]
    fn test_label_exactly_fifty_chars_untouched() {
        let content = "a".repeat(50);
        assert_eq!(item("", &content).label(), content);
    }

    #[test]
    fn test_empty_slug_is_absent() {
        let mut post = item("t", "");
        post.slug = Some(String::new());
        assert_eq!(post.slug(), None);
        post.slug = Some("hello".into());
        assert_eq!(post.slug(), Some("hello"));
    }

    #[test]
    fn test_deserialize_day_record() {
        let json = r#"{
            "date": "2024-02-29",
            "type": "both",
            "count": 2,
            "posts": [{"id": 7, "title": "Leap", "slug": "leap", "type": "post", "published_at": "2024-02-29T10:00:00Z"}],
            "life_records": [{"id": 3, "title": "Walk", "type": "life"}]
        }"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, DayKind::Both);
        assert_eq!(record.count, 2);
        assert_eq!(record.posts[0].slug(), Some("leap"));
        assert_eq!(record.life_records[0].category, Category::Life);
        assert_eq!(record.parsed_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_deserialize_tolerates_nulls_and_unknown_kinds() {
        let json = r#"{"date": "2024-01-01", "type": "none", "count": 0, "posts": null}"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, DayKind::Unknown);
        assert!(record.posts.is_empty());
        assert!(record.life_records.is_empty());
        assert!(!record.has_activity());
    }

    #[test]
    fn test_malformed_date_has_no_parsed_date() {
        let json = r#"{"date": "2024-13-40", "type": "post", "count": 1}"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.parsed_date(), None);
    }

    #[test]
    fn test_date_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(date), "2024-03-05");
    }
}
