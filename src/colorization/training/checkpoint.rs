//! Model checkpoint persistence.
//!
//! Parameters are written as a full-precision named MessagePack record; the
//! recorder appends the `.mpk` extension itself.

use std::path::Path;

use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use tracing::{info, instrument};

use crate::colorization::common::error::{ColorizeError, Result};
use crate::colorization::model::ColorNet;

/// Name of the checkpoint written at the end of a run.
pub const DEFAULT_CHECKPOINT_NAME: &str = "CIFAR100epoch_512Features";

fn recorder() -> NamedMpkFileRecorder<FullPrecisionSettings> {
    NamedMpkFileRecorder::<FullPrecisionSettings>::new()
}

#[instrument(skip(model, path), fields(path = %path.as_ref().display()))]
pub fn save_checkpoint<B: Backend>(model: &ColorNet<B>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    model
        .clone()
        .save_file(path.to_path_buf(), &recorder())
        .map_err(|e| ColorizeError::CheckpointError(format!("{}: {}", path.display(), e)))?;

    info!("Checkpoint saved");
    Ok(())
}

/// Loads parameters from `path` into `model`, which must have the same
/// configuration the checkpoint was trained with.
#[instrument(skip(model, path, device), fields(path = %path.as_ref().display()))]
pub fn load_checkpoint<B: Backend>(
    model: ColorNet<B>,
    path: impl AsRef<Path>,
    device: &B::Device,
) -> Result<ColorNet<B>> {
    let path = path.as_ref();
    let model = model
        .load_file(path.to_path_buf(), &recorder(), device)
        .map_err(|e| ColorizeError::CheckpointError(format!("{}: {}", path.display(), e)))?;

    info!("Checkpoint loaded");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use crate::colorization::model::ColorNetConfig;

    type TestBackend = NdArray<f32>;

    fn small() -> ColorNetConfig {
        ColorNetConfig::new()
            .with_conv1_channels(4)
            .with_conv2_channels(4)
            .with_conv3_channels(8)
            .with_bottleneck_channels(8)
    }

    #[test]
    fn saved_parameters_reproduce_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint");
        let device = Default::default();

        TestBackend::seed(1);
        let trained = small().init::<TestBackend>(&device);
        save_checkpoint(&trained, &path).unwrap();
        assert!(dir.path().join("checkpoint.mpk").is_file());

        TestBackend::seed(2);
        let fresh = small().init::<TestBackend>(&device);
        let restored = load_checkpoint(fresh, &path, &device).unwrap();

        let input = Tensor::<TestBackend, 4>::ones([1, 1, 32, 32], &device);
        let expected = trained.forward(input.clone()).into_data().to_vec::<f32>().unwrap();
        let actual = restored.forward(input).into_data().to_vec::<f32>().unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn missing_checkpoint_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let device = Default::default();
        let model = small().init::<TestBackend>(&device);

        let result = load_checkpoint(model, dir.path().join("absent"), &device);
        assert!(matches!(result, Err(ColorizeError::CheckpointError(_))));
    }
}
