use burn::prelude::*;
use burn::data::dataloader::batcher::Batcher;

use crate::colorization::common::error::{ColorizeError, Result};
use crate::colorization::cifar::IMAGE_PIXELS;
use crate::colorization::dataset::ColorBatcher;
use crate::colorization::lab::LabSample;
use crate::colorization::model::ColorNet;

/// Predicts chrominance for each sample; one planar 2x32x32 vector per input.
pub fn predict<B: Backend>(
    model: &ColorNet<B>,
    samples: &[LabSample],
    device: &B::Device,
) -> Result<Vec<Vec<f32>>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let batch = ColorBatcher::<B>::new(device.clone()).batch(samples.to_vec());
    let output = model
        .forward(batch.lightness)
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| ColorizeError::TensorError(format!("{:?}", e)))?;

    Ok(output.chunks_exact(2 * IMAGE_PIXELS).map(<[f32]>::to_vec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use crate::colorization::model::ColorNetConfig;

    type TestBackend = NdArray<f32>;

    #[test]
    fn one_prediction_per_sample() {
        let device = Default::default();
        let model = ColorNetConfig::new()
            .with_conv1_channels(4)
            .with_conv2_channels(4)
            .with_conv3_channels(4)
            .with_bottleneck_channels(8)
            .init::<TestBackend>(&device);
        let sample = LabSample {
            lightness: vec![50.0; IMAGE_PIXELS],
            chroma: vec![0.0; 2 * IMAGE_PIXELS],
        };

        let predictions = predict(&model, &[sample.clone(), sample.clone(), sample], &device).unwrap();

        assert_eq!(predictions.len(), 3);
        assert!(predictions.iter().all(|p| p.len() == 2 * IMAGE_PIXELS));
    }

    #[test]
    fn empty_input_predicts_nothing() {
        let device = Default::default();
        let model = ColorNetConfig::new().init::<TestBackend>(&device);
        assert!(predict(&model, &[], &device).unwrap().is_empty());
    }
}
