use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder, TimestampMicrosecondBuilder};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;

use fa_core::{CleanRecord, Error, Result};

/// Arrow schema of one partition file. The partition key is encoded in the
/// directory name, not in the file.
pub fn output_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, true),
        Field::new("content", DataType::Utf8, false),
        Field::new("source_name", DataType::Utf8, true),
        Field::new(
            "publish_timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
    ])
}

/// Build one Arrow batch from cleaned rows, column by column.
pub fn build_record_batch(schema: Arc<Schema>, records: &[&CleanRecord]) -> Result<RecordBatch> {
    let num_rows = records.len();
    let mut id_builder = StringBuilder::with_capacity(num_rows, num_rows * 64);
    let mut title_builder = StringBuilder::with_capacity(num_rows, num_rows * 32);
    let mut content_builder = StringBuilder::with_capacity(num_rows, num_rows * 256);
    let mut source_builder = StringBuilder::with_capacity(num_rows, num_rows * 16);
    let mut timestamp_builder = TimestampMicrosecondBuilder::with_capacity(num_rows);

    for record in records {
        id_builder.append_value(&record.id);
        title_builder.append_option(record.title.as_deref());
        content_builder.append_value(&record.content);
        source_builder.append_option(record.source_name.as_deref());
        timestamp_builder.append_option(record.publish_timestamp.map(|ts| ts.timestamp_micros()));
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(id_builder.finish()),
        Arc::new(title_builder.finish()),
        Arc::new(content_builder.finish()),
        Arc::new(source_builder.finish()),
        Arc::new(timestamp_builder.finish()),
    ];

    RecordBatch::try_new(schema, columns).map_err(|e| Error::Transform(e.to_string()))
}
