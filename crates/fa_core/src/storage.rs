use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::ObjectStore;
use url::Url;

use crate::{Error, Result};

/// An object store together with the prefix all reads and writes go under.
#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub store: Arc<dyn ObjectStore>,
    pub prefix: StorePath,
}

impl StoreLocation {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: impl Into<StorePath>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Full object path for a key relative to the prefix.
    pub fn object_path(&self, key: &str) -> StorePath {
        if self.prefix.as_ref().is_empty() {
            StorePath::from(key)
        } else {
            StorePath::from(format!("{}/{}", self.prefix, key))
        }
    }
}

/// Store rooted at an S3 bucket, credentials taken from the environment.
pub fn bucket_location(bucket: &str) -> Result<StoreLocation> {
    let store = AmazonS3Builder::from_env()
        .with_bucket_name(bucket)
        .build()?;
    Ok(StoreLocation::new(Arc::new(store), StorePath::default()))
}

/// Resolve a storage URL into a store and a prefix within it.
///
/// `s3://bucket/prefix` maps to S3 configured from the environment,
/// `file:///dir` and bare paths map to the local filesystem (created if
/// absent), and `mem:` maps to a fresh in-memory store.
pub fn resolve_url(raw: &str) -> Result<StoreLocation> {
    if let Some(rest) = raw.strip_prefix("mem:") {
        let prefix = StorePath::from(rest.trim_start_matches('/'));
        return Ok(StoreLocation::new(Arc::new(InMemory::new()), prefix));
    }

    match Url::parse(raw) {
        Ok(url) if url.scheme() == "s3" => {
            let bucket = url
                .host_str()
                .ok_or_else(|| Error::Config(format!("missing bucket in storage URL: {raw}")))?;
            let store = AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .build()?;
            let prefix = StorePath::from(url.path().trim_start_matches('/'));
            Ok(StoreLocation::new(Arc::new(store), prefix))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| Error::Config(format!("invalid file URL: {raw}")))?;
            local_location(&path)
        }
        Ok(url) => Err(Error::Config(format!(
            "unsupported storage scheme '{}' in {raw}",
            url.scheme()
        ))),
        Err(_) => local_location(std::path::Path::new(raw)),
    }
}

fn local_location(path: &std::path::Path) -> Result<StoreLocation> {
    // A path naming an existing file becomes (parent dir, file name) so a
    // single batch can be addressed directly.
    if path.is_file() {
        let parent = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Config(format!("invalid path: {}", path.display())))?;
        let store = LocalFileSystem::new_with_prefix(parent)?;
        return Ok(StoreLocation::new(Arc::new(store), StorePath::from(name)));
    }

    std::fs::create_dir_all(path)?;
    let store = LocalFileSystem::new_with_prefix(path)?;
    Ok(StoreLocation::new(Arc::new(store), StorePath::default()))
}
