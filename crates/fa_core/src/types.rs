use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One article as staged in a raw batch. Field names are the wire format of
/// the persisted JSON documents and must not drift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedArticle {
    pub article_id: Option<String>,
    pub headline: Option<String>,
    pub article_body: Option<String>,
    pub published_at: Option<String>,
    pub source: ArticleSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSource {
    pub name: Option<String>,
}

/// One cleaned row of the transform job's output. `id` and `content` are
/// always present; `publish_date` is the partition key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRecord {
    pub id: String,
    pub title: Option<String>,
    pub content: String,
    pub source_name: Option<String>,
    pub publish_timestamp: Option<DateTime<Utc>>,
    pub publish_date: Option<NaiveDate>,
}
