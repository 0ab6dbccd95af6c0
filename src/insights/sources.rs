//! Per-platform field maps
//!
//! Each worksheet names which columns carry keyword-bearing text (short
//! titles, search queries) and which carry theme-bearing text (post bodies,
//! descriptions). A logical field lists candidate columns in priority order
//! so a cleaned column written by the cleaning pass wins over the raw one.

use serde::Deserialize;
use serde::Serialize;

use crate::models::Platform;

/// Prefix used by the cleaning pass for normalized copies of a column
pub const CLEANED_PREFIX: &str = "cleaned_";

pub fn cleaned_column(column: &str) -> String {
    format!("{CLEANED_PREFIX}{column}")
}

/// A logical text field and the pools it feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Candidate columns, most preferred first
    pub columns: Vec<String>,
    #[serde(default)]
    pub keywords: bool,
    #[serde(default)]
    pub themes: bool,
}

impl FieldSpec {
    /// Field whose candidates are the cleaned column followed by the raw one
    pub fn new(raw: &str) -> Self {
        Self {
            name: raw.to_string(),
            columns: vec![cleaned_column(raw), raw.to_string()],
            keywords: false,
            themes: false,
        }
    }

    /// Accept a legacy cleaned column, ranked after this crate's own cleaned column
    #[must_use]
    pub fn fallback(mut self, column: &str) -> Self {
        let at = self.columns.len().saturating_sub(1);
        self.columns.insert(at, column.to_string());
        self
    }

    #[must_use]
    pub fn keywords(mut self) -> Self {
        self.keywords = true;
        self
    }

    #[must_use]
    pub fn themes(mut self) -> Self {
        self.themes = true;
        self
    }
}

/// Engagement metric used to re-sample theme text from the best rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSpec {
    /// Numeric column (likes, score, views)
    pub metric: String,
    /// Name of the `FieldSpec` whose text is re-sampled
    pub field: String,
}

/// One worksheet in the store and how to read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub platform: Platform,
    pub worksheet: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub engagement: Option<EngagementSpec>,
    /// Raw column scanned for `#hashtags` before any cleaning
    #[serde(default)]
    pub hashtag_column: Option<String>,
}

impl SourceTable {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Raw columns the cleaning pass should normalize for this worksheet
    pub fn raw_text_columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// Built-in worksheets, in the order their tokens are pooled
pub fn default_sources() -> Vec<SourceTable> {
    vec![
        SourceTable {
            platform: Platform::GoogleTrends,
            worksheet: "GoogleTrends_Related_Queries".to_string(),
            fields: vec![
                FieldSpec::new("query").keywords(),
                FieldSpec::new("keyword_searched").keywords(),
            ],
            engagement: None,
            hashtag_column: None,
        },
        SourceTable {
            platform: Platform::Twitter,
            worksheet: "Twitter_marketing_tweets".to_string(),
            fields: vec![FieldSpec::new("Tweet").themes()],
            engagement: Some(EngagementSpec {
                metric: "public_metrics.like_count".to_string(),
                field: "Tweet".to_string(),
            }),
            hashtag_column: Some("Tweet".to_string()),
        },
        SourceTable {
            platform: Platform::Youtube,
            worksheet: "YouTube_Product_Content".to_string(),
            fields: vec![
                FieldSpec::new("title")
                    .fallback("cleaned_video_title")
                    .keywords()
                    .themes(),
                FieldSpec::new("description")
                    .fallback("cleaned_video_description")
                    .themes(),
            ],
            engagement: Some(EngagementSpec {
                metric: "view_count".to_string(),
                field: "title".to_string(),
            }),
            hashtag_column: None,
        },
        SourceTable {
            platform: Platform::Reddit,
            worksheet: "Reddit_Product_Content".to_string(),
            fields: vec![
                FieldSpec::new("title").keywords().themes(),
                FieldSpec::new("selftext").themes(),
            ],
            engagement: Some(EngagementSpec {
                metric: "score".to_string(),
                field: "title".to_string(),
            }),
            hashtag_column: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue_covers_every_platform() {
        let sources = default_sources();
        for platform in Platform::ALL {
            assert!(sources.iter().any(|s| s.platform == platform), "{platform} missing");
        }
    }

    #[test]
    fn test_cleaned_candidates_come_first() {
        let sources = default_sources();
        let youtube = sources
            .iter()
            .find(|s| s.platform == Platform::Youtube)
            .unwrap();
        let title = youtube.field("title").unwrap();
        assert_eq!(
            title.columns,
            vec!["cleaned_title", "cleaned_video_title", "title"]
        );
        assert!(title.keywords && title.themes);
    }

    #[test]
    fn test_engagement_fields_exist() {
        for source in default_sources() {
            if let Some(engagement) = &source.engagement {
                assert!(source.field(&engagement.field).is_some());
            }
        }
    }

    #[test]
    fn test_source_table_from_toml() {
        let source: SourceTable = toml::from_str(
            r#"
            platform = "reddit"
            worksheet = "Reddit_Alt"
            hashtag_column = "body"

            [[fields]]
            name = "body"
            columns = ["cleaned_body", "body"]
            themes = true

            [engagement]
            metric = "upvotes"
            field = "body"
            "#,
        )
        .unwrap();
        assert_eq!(source.platform, Platform::Reddit);
        assert!(!source.fields[0].keywords);
        assert_eq!(source.engagement.unwrap().metric, "upvotes");
    }
}
