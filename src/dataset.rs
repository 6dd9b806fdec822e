pub mod common_structs;
pub mod error;
pub mod file_index;
pub mod transforms;

pub mod data_augmenters;
pub mod data_loaders;

use error::Result;

/// Random access to samples, the capability external samplers and batchers build on
pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails for `index >= self.len()` without touching any backing storage
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Every sample, in order
    fn iter(&self) -> DatasetIter<'_, Self>
    where
        Self: Sized,
    {
        DatasetIter {
            dataset: self,
            next_element_index: 0,
        }
    }
}

/// Extends the iterator trait to make sure the Dataset has methods display progress
pub trait DataLoader: Iterator {
    /// Returns the next element index, starting from 0
    fn next_element_index(&self) -> usize;
    /// Returns the index of the last element to be loaded
    fn max_elem_index(&self) -> usize;
}

pub struct DatasetIter<'a, D: Dataset> {
    dataset: &'a D,
    next_element_index: usize,
}

impl<'a, D: Dataset> Iterator for DatasetIter<'a, D> {
    type Item = Result<D::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_element_index >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.next_element_index);
        self.next_element_index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.len().saturating_sub(self.next_element_index);
        (remaining, Some(remaining))
    }
}

impl<'a, D: Dataset> ExactSizeIterator for DatasetIter<'a, D> {}

impl<'a, D: Dataset> DataLoader for DatasetIter<'a, D> {
    fn next_element_index(&self) -> usize {
        self.next_element_index
    }

    fn max_elem_index(&self) -> usize {
        self.dataset.len()
    }
}
