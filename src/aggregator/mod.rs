pub mod file_aggregator;
pub mod record_writer;
pub mod report;

pub use file_aggregator::{read_record, AggregationProgress, Aggregator};
pub use record_writer::{FileRecord, RecordWriter};
pub use report::{AggregationReport, AggregationSummary, RecordInfo, SkippedFile};
