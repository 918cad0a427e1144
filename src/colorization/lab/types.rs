//! Lab sample types

use rayon::prelude::*;
use tracing::info;

use crate::colorization::cifar::{CifarImage, IMAGE_PIXELS, IMAGE_SIDE};
use crate::colorization::lab::convert::{lab_to_srgb, srgb_to_lab};

/// Maximum value of the L channel.
pub const MAX_LIGHTNESS: f32 = 100.0;

/// One training pair: lightness input and chrominance target
#[derive(Debug, Clone, PartialEq)]
pub struct LabSample {
    /// L plane, shape 1x32x32, row-major
    pub lightness: Vec<f32>,
    /// a plane followed by b plane, shape 2x32x32
    pub chroma: Vec<f32>,
}

impl LabSample {
    pub fn from_image(image: &CifarImage) -> Self {
        let mut lightness = Vec::with_capacity(IMAGE_PIXELS);
        let mut chroma = vec![0.0f32; 2 * IMAGE_PIXELS];

        for y in 0..IMAGE_SIDE {
            for x in 0..IMAGE_SIDE {
                let [l, a, b] = srgb_to_lab(image.rgb_f32(x, y));
                let p = y * IMAGE_SIDE + x;
                lightness.push(l);
                chroma[p] = a;
                chroma[IMAGE_PIXELS + p] = b;
            }
        }

        Self { lightness, chroma }
    }

    /// Recombines this sample's L with `chroma` (2x32x32 planar) into RGB8,
    /// interleaved.
    pub fn to_rgb8(&self, chroma: &[f32]) -> Vec<u8> {
        debug_assert_eq!(chroma.len(), 2 * IMAGE_PIXELS);
        (0..IMAGE_PIXELS)
            .flat_map(|p| {
                let rgb = lab_to_srgb([self.lightness[p], chroma[p], chroma[IMAGE_PIXELS + p]]);
                rgb.map(|c| (c * 255.0).round() as u8)
            })
            .collect()
    }

    /// Ground truth colours.
    pub fn ground_truth_rgb8(&self) -> Vec<u8> {
        self.to_rgb8(&self.chroma)
    }

    /// Lightness rendered as interleaved gray RGB8.
    pub fn lightness_rgb8(&self) -> Vec<u8> {
        self.lightness
            .iter()
            .flat_map(|&l| {
                let v = (l / MAX_LIGHTNESS * 255.0).round().clamp(0.0, 255.0) as u8;
                [v, v, v]
            })
            .collect()
    }
}

/// Converts every image once, in parallel, keeping dataset order.
pub fn preprocess(images: &[CifarImage]) -> Vec<LabSample> {
    info!("Converting {} images to Lab", images.len());
    images.par_iter().map(LabSample::from_image).collect()
}
