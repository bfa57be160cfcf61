//! Data module - CSV loading and normalization

mod fallback;
mod loader;
mod processor;
mod query;
mod record;

pub use fallback::fallback_businesses;
pub use loader::{
    build_client, source_for, BusinessDataLoader, CsvSource, FileSource, HttpSource, LoadError,
    StaticSource,
};
pub use processor::{CellValue, CsvRow, ProcessorError, RowProcessor};
pub use query::{featured_businesses, filter_businesses, get_business_by_id, BusinessFilters};
pub use record::{BusinessRecord, UNKNOWN_BUSINESS};
