use crate::dataset::common_structs::{PartitionRange, Record};
use crate::dataset::error::{DatasetError, Result};
use crate::dataset::file_index::FileIndex;
use crate::dataset::transforms::{
    identity_image, identity_label, ImageTransform, LabelTransform,
};
use crate::dataset::Dataset;
use image::{DynamicImage, ImageError};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const TRAIN_SUB_DIR: &str = "train";
pub const TEST_SUB_DIR: &str = "test";
pub const IMAGE_EXTENSION: &str = "jpg";

/// Landmark photos laid out as `<data_dir>/{train,test}/<image_id>.jpg`,
/// labeled by a file index, optionally restricted to one client's slice of it.
///
/// Built once per partition and never mutated, so any number of loader
/// threads can call [`Dataset::get`] on a shared reference.
pub struct Landmarks<I = DynamicImage, L = i64> {
    data_dir: PathBuf,
    index: FileIndex,
    range: Option<PartitionRange>,
    is_test: bool,
    transform: ImageTransform<I>,
    target_transform: LabelTransform<L>,
}

impl Landmarks {
    pub fn builder<P: Into<PathBuf>>(data_dir: P, index: FileIndex) -> LandmarksBuilder {
        LandmarksBuilder {
            data_dir: data_dir.into(),
            index,
            range: None,
            is_test: false,
            transform: identity_image(),
            target_transform: identity_label(),
        }
    }

    /// Untransformed dataset over `index[range]` (or all of it)
    pub fn new<P: Into<PathBuf>>(
        data_dir: P,
        index: FileIndex,
        is_test: bool,
        range: Option<(usize, usize)>,
    ) -> Result<Landmarks> {
        let mut builder = Landmarks::builder(data_dir, index).is_test(is_test);
        if let Some(range) = range {
            builder = builder.range(range);
        }
        builder.build()
    }
}

impl<I, L> Landmarks<I, L> {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn is_test(&self) -> bool {
        self.is_test
    }

    pub fn range(&self) -> Option<PartitionRange> {
        self.range
    }

    /// The records this instance can hand out
    pub fn records(&self) -> &[Record] {
        match self.range {
            Some(range) => &self.index[range.start..range.end],
            None => self.index.as_slice(),
        }
    }

    pub fn record(&self, index: usize) -> Result<&Record> {
        let records = self.records();
        records.get(index).ok_or(DatasetError::OutOfBounds {
            index,
            len: records.len(),
        })
    }

    /// Where `get(index)` will read from, without touching the filesystem
    pub fn image_path(&self, index: usize) -> Result<PathBuf> {
        let record = self.record(index)?;
        Ok(self.path_for(record))
    }

    fn path_for(&self, record: &Record) -> PathBuf {
        let sub_dir = if self.is_test {
            TEST_SUB_DIR
        } else {
            TRAIN_SUB_DIR
        };
        self.data_dir
            .join(sub_dir)
            .join(format!("{}.{}", record.image_id, IMAGE_EXTENSION))
    }
}

impl<I, L> Dataset for Landmarks<I, L> {
    type Item = (I, L);

    fn len(&self) -> usize {
        self.records().len()
    }

    fn get(&self, index: usize) -> Result<(I, L)> {
        let record = self.record(index)?;
        let img = load_image(&self.path_for(record))?;
        let img = (self.transform)(img);
        let label = (self.target_transform)(record.class);
        Ok((img, label))
    }
}

impl<I, L> fmt::Debug for Landmarks<I, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Landmarks")
            .field("data_dir", &self.data_dir)
            .field("index_len", &self.index.len())
            .field("range", &self.range)
            .field("is_test", &self.is_test)
            .finish()
    }
}

/// Opens and decodes one image, splitting a missing file apart from a broken one
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|err| match err {
        ImageError::IoError(source) if source.kind() == io::ErrorKind::NotFound => {
            DatasetError::NotFound {
                path: path.to_owned(),
            }
        }
        ImageError::IoError(source) => DatasetError::Io {
            path: path.to_owned(),
            source,
        },
        other => DatasetError::Decode {
            path: path.to_owned(),
            source: other,
        },
    })
}

pub struct LandmarksBuilder<I = DynamicImage, L = i64> {
    data_dir: PathBuf,
    index: FileIndex,
    range: Option<PartitionRange>,
    is_test: bool,
    transform: ImageTransform<I>,
    target_transform: LabelTransform<L>,
}

impl<I, L> LandmarksBuilder<I, L> {
    /// Reads from `test/` instead of `train/`
    pub fn is_test(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    pub fn range<R: Into<PartitionRange>>(mut self, range: R) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn transform<T>(
        self,
        transform: impl Fn(DynamicImage) -> T + Send + Sync + 'static,
    ) -> LandmarksBuilder<T, L> {
        self.shared_transform(Arc::new(transform))
    }

    pub fn shared_transform<T>(self, transform: ImageTransform<T>) -> LandmarksBuilder<T, L> {
        LandmarksBuilder {
            data_dir: self.data_dir,
            index: self.index,
            range: self.range,
            is_test: self.is_test,
            transform,
            target_transform: self.target_transform,
        }
    }

    pub fn target_transform<T>(
        self,
        target_transform: impl Fn(i64) -> T + Send + Sync + 'static,
    ) -> LandmarksBuilder<I, T> {
        LandmarksBuilder {
            data_dir: self.data_dir,
            index: self.index,
            range: self.range,
            is_test: self.is_test,
            transform: self.transform,
            target_transform: Arc::new(target_transform),
        }
    }

    pub fn build(self) -> Result<Landmarks<I, L>> {
        if let Some(range) = self.range {
            range.validate(self.index.len())?;
        }
        let dataset = Landmarks {
            data_dir: self.data_dir,
            index: self.index,
            range: self.range,
            is_test: self.is_test,
            transform: self.transform,
            target_transform: self.target_transform,
        };
        debug!(
            data_dir = %dataset.data_dir.display(),
            is_test = dataset.is_test,
            range = ?dataset.range,
            len = dataset.len(),
            "built landmarks dataset"
        );
        Ok(dataset)
    }
}
