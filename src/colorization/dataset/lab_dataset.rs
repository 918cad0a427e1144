use burn::data::dataset::{Dataset, InMemDataset};
use tracing::debug;

use crate::colorization::common::error::{ColorizeError, Result};
use crate::colorization::lab::LabSample;

/// In-memory, ordered collection of Lab samples
pub struct LabDataset {
    inner: InMemDataset<LabSample>,
}

impl LabDataset {
    pub fn new(samples: Vec<LabSample>) -> Self {
        Self {
            inner: InMemDataset::new(samples),
        }
    }

    /// Splits by position: training is `[0, train_size)`, validation the
    /// `val_size` samples right after it.
    pub fn split(
        mut samples: Vec<LabSample>,
        train_size: usize,
        val_size: usize,
    ) -> Result<(Self, Self)> {
        let available = samples.len();
        let needed = train_size.checked_add(val_size);
        if train_size == 0 || val_size == 0 || needed.is_none_or(|n| n > available) {
            return Err(ColorizeError::InvalidSplit {
                train: train_size,
                val: val_size,
                available,
            });
        }

        samples.truncate(train_size + val_size);
        let valid = samples.split_off(train_size);
        debug!(train = samples.len(), valid = valid.len(), "Split dataset");

        Ok((Self::new(samples), Self::new(valid)))
    }
}

impl Dataset<LabSample> for LabDataset {
    fn get(&self, index: usize) -> Option<LabSample> {
        self.inner.get(index)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
