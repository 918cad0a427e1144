//! Decoder for the CIFAR-10 binary batch format.
//!
//! Each record is one label byte followed by the red, green and blue planes
//! of a 32x32 image, every plane stored row-major.

use tracing::debug;
use crate::colorization::common::error::{Result, ColorizeError};
use crate::colorization::cifar::types::{CifarImage, IMAGE_PIXELS};

/// Size of one record: label + 3 planes.
pub const RECORD_BYTES: usize = 1 + 3 * IMAGE_PIXELS;

const NUM_CLASSES: u8 = 10;

/// Decodes a whole batch file into images, preserving record order.
///
/// # Errors
///
/// * `DecodeError` if the buffer is not a whole number of records or a label
///   is out of range.
pub fn decode_batch(data: &[u8]) -> Result<Vec<CifarImage>> {
    if data.is_empty() || data.len() % RECORD_BYTES != 0 {
        return Err(ColorizeError::DecodeError(format!(
            "batch of {} bytes is not a multiple of the {}-byte record size",
            data.len(),
            RECORD_BYTES
        )));
    }

    debug!("Decoding {} CIFAR-10 records", data.len() / RECORD_BYTES);

    data.chunks_exact(RECORD_BYTES)
        .enumerate()
        .map(|(idx, record)| {
            let label = record[0];
            if label >= NUM_CLASSES {
                return Err(ColorizeError::DecodeError(format!(
                    "record {} has label {} (expected < {})",
                    idx, label, NUM_CLASSES
                )));
            }

            let (r, rest) = record[1..].split_at(IMAGE_PIXELS);
            let (g, b) = rest.split_at(IMAGE_PIXELS);

            // Planar RRR..GGG..BBB -> interleaved RGBRGB..
            let pixels = r.iter()
                .zip(g)
                .zip(b)
                .flat_map(|((&r, &g), &b)| [r, g, b])
                .collect();

            Ok(CifarImage { label, pixels })
        })
        .collect()
}
