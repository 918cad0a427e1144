//! Preview image types

use crate::colorization::cifar::{IMAGE_PIXELS, IMAGE_SIDE};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - balanced (default)
    Deflate,
}

/// Encoding options for the preview grid
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::Deflate,
            predictor: Some(2),
        }
    }
}

/// One row of the grid, each tile a 32x32 interleaved RGB8 image.
#[derive(Debug, Clone)]
pub struct PreviewRow {
    pub input: Vec<u8>,
    pub prediction: Vec<u8>,
    pub ground: Vec<u8>,
}

/// White gutter between tiles, in output pixels.
const GUTTER: usize = 2;
const COLUMNS: usize = 3;

/// Rows of (input, prediction, ground) tiles composed into one RGB8 image.
#[derive(Debug, Clone)]
pub struct PreviewGrid {
    pub width: usize,
    pub height: usize,
    /// Interleaved RGB8
    pub data: Vec<u8>,
}

impl PreviewGrid {
    /// Builds the grid, upscaling each tile by `scale` with nearest neighbour.
    pub fn compose(rows: &[PreviewRow], scale: usize) -> Self {
        let scale = scale.max(1);
        let tile = IMAGE_SIDE * scale;
        let width = COLUMNS * tile + (COLUMNS + 1) * GUTTER;
        let height = rows.len() * tile + (rows.len() + 1) * GUTTER;
        let mut data = vec![255u8; width * height * 3];

        for (r, row) in rows.iter().enumerate() {
            for (c, tile_rgb) in [&row.input, &row.prediction, &row.ground].into_iter().enumerate() {
                debug_assert_eq!(tile_rgb.len(), IMAGE_PIXELS * 3);
                let x0 = GUTTER + c * (tile + GUTTER);
                let y0 = GUTTER + r * (tile + GUTTER);
                for ty in 0..tile {
                    for tx in 0..tile {
                        let src = ((ty / scale) * IMAGE_SIDE + tx / scale) * 3;
                        let dst = ((y0 + ty) * width + x0 + tx) * 3;
                        data[dst..dst + 3].copy_from_slice(&tile_rgb[src..src + 3]);
                    }
                }
            }
        }

        Self { width, height, data }
    }
}
