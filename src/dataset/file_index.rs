use super::common_structs::{PartitionRange, RawRecord, Record};
use super::error::{DatasetError, Result};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

/// Ordered, immutable list of records for one split.
/// Cloning is cheap, every partition built from the same index shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndex {
    records: Arc<[Record]>,
}

impl FileIndex {
    pub fn new(records: Vec<Record>) -> FileIndex {
        FileIndex {
            records: records.into(),
        }
    }

    /// Parses every class, failing on the first row that is not an integer
    pub fn from_raw(rows: Vec<RawRecord>) -> Result<FileIndex> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(position, raw)| raw.into_record(position))
            .collect::<Result<Vec<Record>>>()?;
        Ok(FileIndex::new(records))
    }

    /// Expects a json array of `{"image_id", "class", "user_id"}` objects
    pub fn from_json_reader<R: Read>(reader: R) -> Result<FileIndex> {
        let rows: Vec<RawRecord> = serde_json::from_reader(reader)?;
        FileIndex::from_raw(rows)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<FileIndex> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_owned(),
            source,
        })?;
        FileIndex::from_json_reader(BufReader::new(file))
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Runs of consecutive records sharing a `user_id`, in index order.
    /// A user whose records are not adjacent shows up once per run.
    pub fn user_ranges(&self) -> Vec<(String, PartitionRange)> {
        let runs = self
            .records
            .iter()
            .enumerate()
            .chunk_by(|&(_, record)| record.user_id.as_str());
        let ranges = runs
            .into_iter()
            .filter_map(|(user_id, mut run)| {
                let (start, _) = run.next()?;
                let end = run.last().map_or(start, |(pos, _)| pos) + 1;
                Some((user_id.to_string(), PartitionRange::new(start, end)))
            })
            .collect();
        ranges
    }
}

impl Deref for FileIndex {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Record>> for FileIndex {
    fn from(records: Vec<Record>) -> Self {
        FileIndex::new(records)
    }
}
