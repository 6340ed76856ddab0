pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::{Config, DEFAULT_BLOB_KEY};
pub use error::SymptomLogError;
pub use model::symptom::{SymptomEntry, SEVERITY_RANGE};
pub use model::symptom_log::SymptomLog;
pub use repository::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use service::symptom_store::SymptomStore;
pub use service::time_series::{
    default_range, group_by_symptom, SymptomFilter, SymptomSeries, TimeSeriesBuilder, TimeSeriesPoint,
};
pub use time::{parse_human_day, CalendarDay};
