use burn::data::dataloader::batcher::Batcher;
use burn::prelude::*;
use burn::tensor::TensorData;

use crate::colorization::cifar::{IMAGE_PIXELS, IMAGE_SIDE};
use crate::colorization::lab::LabSample;

/// Stacks samples into `[N, 1, 32, 32]` inputs and `[N, 2, 32, 32]` targets.
#[derive(Clone, Debug)]
pub struct ColorBatcher<B: Backend> {
    device: B::Device,
}

#[derive(Clone, Debug)]
pub struct ColorBatch<B: Backend> {
    pub lightness: Tensor<B, 4>,
    pub chroma: Tensor<B, 4>,
}

impl<B: Backend> ColorBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<LabSample, ColorBatch<B>> for ColorBatcher<B> {
    fn batch(&self, items: Vec<LabSample>) -> ColorBatch<B> {
        let n = items.len();
        let mut lightness = Vec::with_capacity(n * IMAGE_PIXELS);
        let mut chroma = Vec::with_capacity(n * 2 * IMAGE_PIXELS);
        for item in &items {
            lightness.extend_from_slice(&item.lightness);
            chroma.extend_from_slice(&item.chroma);
        }

        let lightness = TensorData::new(lightness, [n, 1, IMAGE_SIDE, IMAGE_SIDE])
            .convert::<B::FloatElem>();
        let chroma = TensorData::new(chroma, [n, 2, IMAGE_SIDE, IMAGE_SIDE])
            .convert::<B::FloatElem>();

        ColorBatch {
            lightness: Tensor::from_data(lightness, &self.device),
            chroma: Tensor::from_data(chroma, &self.device),
        }
    }
}
