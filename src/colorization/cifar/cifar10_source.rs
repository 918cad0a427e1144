//! CIFAR-10 image source backed by the on-disk binary batches.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::colorization::common::error::{ColorizeError, Result};
use crate::colorization::cifar::binary::decode_batch;
use crate::colorization::cifar::download::ensure_downloaded;
use crate::colorization::cifar::source::ImageSource;
use crate::colorization::cifar::types::{CifarImage, Split};

/// Reads CIFAR-10 from `root`, downloading it there first when allowed.
#[derive(Debug, Clone)]
pub struct Cifar10Source {
    root: PathBuf,
    download: bool,
    split: Split,
}

impl Cifar10Source {
    pub fn new(root: impl Into<PathBuf>, download: bool) -> Self {
        Self {
            root: root.into(),
            download,
            split: Split::Train,
        }
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    pub fn split(&self) -> Split {
        self.split
    }
}

impl ImageSource for Cifar10Source {
    fn load_images(&self) -> Result<Vec<CifarImage>> {
        let batches = ensure_downloaded(&self.root, self.download)?;

        let mut images = Vec::new();
        for name in self.split.batch_files() {
            let path = batches.join(&name);
            let bytes = std::fs::read(&path).map_err(|e| {
                ColorizeError::DatasetReadError(format!("{}: {}", path.display(), e))
            })?;
            let decoded = decode_batch(&bytes)?;
            debug!("{}: {} images", name, decoded.len());
            images.extend(decoded);
        }

        info!(split = ?self.split, count = images.len(), "Loaded CIFAR-10");
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorization::cifar::binary::RECORD_BYTES;
    use crate::colorization::cifar::download::BATCHES_DIR;
    use crate::colorization::cifar::download::tests::write_complete_cache;

    fn write_batch(dir: &std::path::Path, name: &str, labels: &[u8]) {
        let mut data = Vec::with_capacity(labels.len() * RECORD_BYTES);
        for &label in labels {
            data.push(label);
            data.extend(std::iter::repeat(label * 10).take(RECORD_BYTES - 1));
        }
        std::fs::write(dir.join(name), data).unwrap();
    }

    #[test]
    fn reads_train_batches_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let batches = dir.path().join(BATCHES_DIR);
        write_complete_cache(&batches);
        for i in 1..=5u8 {
            write_batch(&batches, &format!("data_batch_{}.bin", i), &[i, i - 1]);
        }

        let images = Cifar10Source::new(dir.path(), false).load_images().unwrap();

        let labels: Vec<u8> = images.iter().map(|img| img.label).collect();
        assert_eq!(labels, vec![1, 0, 2, 1, 3, 2, 4, 3, 5, 4]);
    }

    #[test]
    fn incomplete_cache_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let batches = dir.path().join(BATCHES_DIR);
        std::fs::create_dir_all(&batches).unwrap();
        write_batch(&batches, "data_batch_1.bin", &[0]);

        let result = Cifar10Source::new(dir.path(), false).load_images();
        assert!(matches!(result, Err(ColorizeError::DatasetReadError(_))));
    }

    #[test]
    fn test_split_reads_test_batch() {
        let dir = tempfile::tempdir().unwrap();
        let batches = dir.path().join(BATCHES_DIR);
        write_complete_cache(&batches);
        write_batch(&batches, "test_batch.bin", &[9, 8, 7]);

        let source = Cifar10Source::new(dir.path(), false).with_split(Split::Test);
        let images = source.load_images().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].label, 9);
    }
}
