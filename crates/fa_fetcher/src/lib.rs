pub mod client;
pub mod normalize;
pub mod upload;

pub use client::{ApiArticle, NewsApiClient, NEWS_API_BASE_URL, SEARCH_KEYWORDS};
pub use normalize::normalize;
pub use upload::{batch_key, upload_batch};

use chrono::Utc;
use tracing::info;

use fa_core::storage::StoreLocation;
use fa_core::Result;

pub mod prelude {
    pub use crate::client::{ApiArticle, NewsApiClient};
    pub use fa_core::{Error, NormalizedArticle, Result};
}

/// One fetch cycle: search, normalize, upload. Returns the written object
/// path, or `None` when the search came back empty.
pub async fn run(client: &NewsApiClient, location: &StoreLocation) -> Result<Option<String>> {
    let articles = client.fetch_articles().await?;
    info!("📰 Fetched {} articles from the news API", articles.len());

    if articles.is_empty() {
        info!("No new articles found, nothing to upload");
        return Ok(None);
    }

    let batch: Vec<_> = articles.into_iter().map(normalize).collect();
    let path = upload_batch(location, &batch, Utc::now()).await?;
    info!("💾 Uploaded batch of {} articles to {}", batch.len(), path);
    Ok(Some(path))
}
