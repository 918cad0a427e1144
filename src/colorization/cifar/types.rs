//! CIFAR-10 image types

use crate::colorization::common::error::{ColorizeError, Result};

/// Side length of every CIFAR-10 image.
pub const IMAGE_SIDE: usize = 32;

/// Pixels per image (one channel).
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// A decoded CIFAR-10 image
#[derive(Debug, Clone, PartialEq)]
pub struct CifarImage {
    /// Class label (0..=9)
    pub label: u8,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...], row-major
    pub pixels: Vec<u8>,
}

impl CifarImage {
    /// Checks the buffer holds exactly one 32x32 RGB image and the label is a
    /// CIFAR-10 class.
    pub fn validate(&self) -> Result<()> {
        if self.pixels.len() != IMAGE_PIXELS * 3 {
            return Err(ColorizeError::DecodeError(format!(
                "image has {} bytes, expected {}",
                self.pixels.len(),
                IMAGE_PIXELS * 3
            )));
        }
        if self.label > 9 {
            return Err(ColorizeError::DecodeError(format!("label {} out of range", self.label)));
        }
        Ok(())
    }

    /// Returns the RGB triple at `(x, y)` scaled to [0, 1].
    pub fn rgb_f32(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * IMAGE_SIDE + x) * 3;
        [
            self.pixels[i] as f32 / 255.0,
            self.pixels[i + 1] as f32 / 255.0,
            self.pixels[i + 2] as f32 / 255.0,
        ]
    }
}

/// Which part of CIFAR-10 to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// `data_batch_1.bin` .. `data_batch_5.bin`, 50 000 images
    Train,
    /// `test_batch.bin`, 10 000 images
    Test,
}

impl Split {
    pub fn batch_files(&self) -> Vec<String> {
        match self {
            Split::Train => (1..=5).map(|i| format!("data_batch_{}.bin", i)).collect(),
            Split::Test => vec!["test_batch.bin".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_split_lists_five_batches_in_order() {
        let files = Split::Train.batch_files();
        assert_eq!(files.len(), 5);
        assert_eq!(files[0], "data_batch_1.bin");
        assert_eq!(files[4], "data_batch_5.bin");
    }

    #[test]
    fn validate_rejects_short_buffers_and_bad_labels() {
        let good = CifarImage { label: 9, pixels: vec![0; IMAGE_PIXELS * 3] };
        assert!(good.validate().is_ok());

        let short = CifarImage { label: 0, pixels: vec![0; IMAGE_PIXELS] };
        assert!(matches!(short.validate(), Err(ColorizeError::DecodeError(_))));

        let bad_label = CifarImage { label: 10, ..good };
        assert!(matches!(bad_label.validate(), Err(ColorizeError::DecodeError(_))));
    }

    #[test]
    fn rgb_f32_reads_interleaved_pixel() {
        let mut pixels = vec![0u8; IMAGE_PIXELS * 3];
        let i = (2 * IMAGE_SIDE + 1) * 3;
        pixels[i] = 255;
        pixels[i + 2] = 51;
        let image = CifarImage { label: 0, pixels };

        assert_eq!(image.rgb_f32(1, 2), [1.0, 0.0, 0.2]);
    }
}
