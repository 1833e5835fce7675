use futures_util::TryStreamExt;
use object_store::ObjectStore;
use tracing::info;

use fa_core::storage::StoreLocation;
use fa_core::{NormalizedArticle, Result};

/// Read every JSON batch under the input prefix against the fixed batch
/// schema. A location naming a single `.json` object reads exactly that
/// object.
pub async fn read_batches(location: &StoreLocation) -> Result<(Vec<NormalizedArticle>, usize)> {
    let mut paths = Vec::new();
    if location.prefix.as_ref().ends_with(".json") {
        paths.push(location.prefix.clone());
    } else {
        let prefix = (!location.prefix.as_ref().is_empty()).then(|| location.prefix.clone());
        let mut objects: Vec<_> = location.store.list(prefix.as_ref()).try_collect().await?;
        objects.sort_by(|a, b| a.location.as_ref().cmp(b.location.as_ref()));
        paths.extend(
            objects
                .into_iter()
                .map(|meta| meta.location)
                .filter(|path| path.as_ref().ends_with(".json")),
        );
    }

    let mut articles = Vec::new();
    let mut batches = 0;
    for path in paths {
        let bytes = location.store.get(&path).await?.bytes().await?;
        let mut batch: Vec<NormalizedArticle> = serde_json::from_slice(&bytes)?;
        info!("Read {} records from {}", batch.len(), path);
        articles.append(&mut batch);
        batches += 1;
    }

    Ok((articles, batches))
}
