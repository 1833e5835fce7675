use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::warn;

use fa_core::{CleanRecord, NormalizedArticle};

/// Fixed pattern for the raw `publishedAt` field. Values that do not match
/// keep their row but lose the timestamp.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Rows whose content is this many characters or fewer are dropped.
pub const MIN_CONTENT_CHARS: usize = 50;

#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub records: Vec<CleanRecord>,
    pub dropped_quality: usize,
    pub dropped_duplicates: usize,
    pub unparseable_timestamps: usize,
}

/// Clean one run's worth of raw articles: project and rename fields, parse
/// the publish timestamp, apply the content-quality filter, and deduplicate
/// by id keeping the first occurrence.
pub fn clean_records(raw: Vec<NormalizedArticle>) -> TransformOutcome {
    let mut outcome = TransformOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for article in raw {
        let (id, content) = match (article.article_id, article.article_body) {
            (Some(id), Some(content)) if content.chars().count() > MIN_CONTENT_CHARS => {
                (id, content)
            }
            _ => {
                outcome.dropped_quality += 1;
                continue;
            }
        };

        if !seen.insert(id.clone()) {
            warn!(id = %id, "dropping duplicate article id");
            outcome.dropped_duplicates += 1;
            continue;
        }

        let publish_timestamp = match article.published_at.as_deref() {
            Some(value) => match NaiveDateTime::parse_from_str(value, PUBLISHED_AT_FORMAT) {
                Ok(ts) => Some(ts.and_utc()),
                Err(_) => {
                    warn!(
                        id = %id,
                        value,
                        "publishedAt does not match the expected pattern, keeping row with null timestamp"
                    );
                    outcome.unparseable_timestamps += 1;
                    None
                }
            },
            None => None,
        };

        outcome.records.push(CleanRecord {
            id,
            title: article.headline,
            content,
            source_name: article.source.name,
            publish_date: publish_timestamp.map(|ts| ts.date_naive()),
            publish_timestamp,
        });
    }

    outcome
}
