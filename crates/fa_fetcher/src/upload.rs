use chrono::{DateTime, Utc};
use object_store::ObjectStore;

use fa_core::storage::StoreLocation;
use fa_core::{NormalizedArticle, Result};

/// Timestamp-named key for one fetch cycle's batch, unique per second.
pub fn batch_key(now: DateTime<Utc>) -> String {
    format!("raw_news_{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Upload a full batch as one pretty-printed JSON document. Batches are
/// immutable once written.
pub async fn upload_batch(
    location: &StoreLocation,
    articles: &[NormalizedArticle],
    now: DateTime<Utc>,
) -> Result<String> {
    let path = location.object_path(&batch_key(now));
    let body = serde_json::to_vec_pretty(articles)?;
    location.store.put(&path, body.into()).await?;
    Ok(path.to_string())
}
