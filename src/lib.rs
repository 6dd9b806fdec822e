pub mod config;
pub mod dataset;

pub use config::LandmarksConfig;
pub use dataset::common_structs::{PartitionRange, RawRecord, Record};
pub use dataset::data_loaders::{Landmarks, LandmarksBuilder};
pub use dataset::error::{DatasetError, Result};
pub use dataset::file_index::FileIndex;
pub use dataset::Dataset;
