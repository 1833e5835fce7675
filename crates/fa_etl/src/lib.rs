pub mod reader;
pub mod schema;
pub mod transform;
pub mod writer;

pub use transform::{clean_records, TransformOutcome, MIN_CONTENT_CHARS, PUBLISHED_AT_FORMAT};
pub use writer::{clear_output, partition_dir, write_partitioned, DEFAULT_PARTITION};

use tracing::{info, warn};

use fa_core::storage::StoreLocation;
use fa_core::Result;

pub mod prelude {
    pub use crate::{run_job, EtlSummary};
    pub use fa_core::{CleanRecord, Error, NormalizedArticle, Result};
}

/// Counters from one transform run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    pub batches_read: usize,
    pub raw_records: usize,
    pub dropped_quality: usize,
    pub dropped_duplicates: usize,
    pub unparseable_timestamps: usize,
    pub records_written: usize,
    pub partitions_written: usize,
}

/// Full batch run: read every JSON batch under the input, clean and
/// deduplicate, then replace the output with date-partitioned parquet.
pub async fn run_job(input: &StoreLocation, output: &StoreLocation) -> Result<EtlSummary> {
    let (raw, batches_read) = reader::read_batches(input).await?;
    let raw_records = raw.len();
    info!("Read {} raw records from {} batches", raw_records, batches_read);

    let outcome = clean_records(raw);
    if outcome.dropped_duplicates > 0 || outcome.unparseable_timestamps > 0 {
        warn!(
            duplicates = outcome.dropped_duplicates,
            unparseable_timestamps = outcome.unparseable_timestamps,
            "input contained rows upstream should not produce"
        );
    }

    let replaced = clear_output(output).await?;
    if replaced > 0 {
        info!("Cleared {} objects from a previous run", replaced);
    }

    let partitions_written = write_partitioned(output, &outcome.records).await?;
    info!(
        "Transformation complete, wrote {} records across {} partitions",
        outcome.records.len(),
        partitions_written
    );

    Ok(EtlSummary {
        batches_read,
        raw_records,
        dropped_quality: outcome.dropped_quality,
        dropped_duplicates: outcome.dropped_duplicates,
        unparseable_timestamps: outcome.unparseable_timestamps,
        records_written: outcome.records.len(),
        partitions_written,
    })
}
