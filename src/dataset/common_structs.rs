use super::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
// Frequently used structs in the provided loaders and index readers

/// One labeled image of the file index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub image_id: String,
    pub class: i64,
    /// Owning client, not used when loading samples
    #[serde(default)]
    pub user_id: String,
}

impl Record {
    pub fn new(image_id: impl Into<String>, class: i64, user_id: impl Into<String>) -> Record {
        Record {
            image_id: image_id.into(),
            class,
            user_id: user_id.into(),
        }
    }
}

/// Metadata rows come from csv exports turned into json, so ids and classes
/// show up both as strings and as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// A record as it appears in the metadata, before the class is parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub image_id: StringOrNumber,
    pub class: StringOrNumber,
    #[serde(default)]
    pub user_id: Option<StringOrNumber>,
}

/// Numbers must be whole (`3` or `3.0`), strings must spell an integer (`"3"`, not `"3.0"`)
fn parse_class(class: StringOrNumber, position: usize) -> Result<i64> {
    let parsed = match &class {
        StringOrNumber::String(s) => s.trim().parse::<i64>().ok(),
        StringOrNumber::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
    };
    parsed.ok_or_else(|| DatasetError::InvalidClass {
        position,
        class: class.into_string(),
    })
}

impl RawRecord {
    /// `position` is only used to point at the offending row on error
    pub fn into_record(self, position: usize) -> Result<Record> {
        let class = parse_class(self.class, position)?;
        Ok(Record {
            image_id: self.image_id.into_string(),
            class,
            user_id: self.user_id.map(StringOrNumber::into_string).unwrap_or_default(),
        })
    }
}

/// For a single row, errors report position 0
impl TryFrom<RawRecord> for Record {
    type Error = DatasetError;

    fn try_from(raw: RawRecord) -> Result<Record> {
        raw.into_record(0)
    }
}

/// Contiguous `[start, end)` window into a file index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRange {
    pub start: usize,
    pub end: usize,
}

impl PartitionRange {
    pub fn new(start: usize, end: usize) -> PartitionRange {
        PartitionRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `start <= end <= index_len`
    pub fn validate(&self, index_len: usize) -> Result<()> {
        if self.start > self.end || self.end > index_len {
            return Err(DatasetError::InvalidRange {
                start: self.start,
                end: self.end,
                len: index_len,
            });
        }
        Ok(())
    }
}

impl From<(usize, usize)> for PartitionRange {
    fn from((start, end): (usize, usize)) -> Self {
        PartitionRange { start, end }
    }
}
