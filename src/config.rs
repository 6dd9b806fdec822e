use crate::dataset::data_loaders::Landmarks;
use crate::dataset::error::{DatasetError, Result};
use crate::dataset::file_index::FileIndex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Everything needed to build one client's partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarksConfig {
    pub data_dir: PathBuf,
    /// Json file index, relative paths are resolved against the working dir
    pub index_file: PathBuf,
    #[serde(default)]
    pub is_test: bool,
    #[serde(default)]
    pub range: Option<(usize, usize)>,
}

impl LandmarksConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LandmarksConfig> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn load_dataset(&self) -> Result<Landmarks> {
        let index = FileIndex::from_json_file(&self.index_file)?;
        Landmarks::new(self.data_dir.clone(), index, self.is_test, self.range)
    }
}
