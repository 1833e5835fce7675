use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::TryStreamExt;
use object_store::ObjectStore;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;

use fa_core::storage::StoreLocation;
use fa_core::{CleanRecord, Error, Result};

use crate::schema::{build_record_batch, output_schema};

/// Directory used for rows whose publish date could not be derived.
pub const DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

pub fn partition_dir(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("publish_date={}", date.format("%Y-%m-%d")),
        None => format!("publish_date={DEFAULT_PARTITION}"),
    }
}

/// Delete everything under the output prefix. Every run fully replaces the
/// previous output.
pub async fn clear_output(location: &StoreLocation) -> Result<usize> {
    let prefix = (!location.prefix.as_ref().is_empty()).then(|| location.prefix.clone());
    let objects: Vec<_> = location.store.list(prefix.as_ref()).try_collect().await?;
    let deleted = objects.len();
    for meta in objects {
        location.store.delete(&meta.location).await?;
    }
    Ok(deleted)
}

/// Write cleaned rows grouped by publish date, one SNAPPY-compressed
/// parquet file per partition directory. Returns the partition count.
pub async fn write_partitioned(
    location: &StoreLocation,
    records: &[CleanRecord],
) -> Result<usize> {
    let mut partitions: BTreeMap<String, Vec<&CleanRecord>> = BTreeMap::new();
    for record in records {
        partitions
            .entry(partition_dir(record.publish_date))
            .or_default()
            .push(record);
    }

    let schema = Arc::new(output_schema());

    for (dir, rows) in &partitions {
        let batch = build_record_batch(schema.clone(), rows)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, schema.clone(), Some(props))
            .map_err(|e| Error::Transform(e.to_string()))?;
        writer
            .write(&batch)
            .map_err(|e| Error::Transform(e.to_string()))?;
        writer
            .close()
            .map_err(|e| Error::Transform(e.to_string()))?;

        let path = location.object_path(&format!("{dir}/part-00000.parquet"));
        location.store.put(&path, buf.into()).await?;
        info!("Wrote {} rows to {}", rows.len(), path);
    }

    Ok(partitions.len())
}
