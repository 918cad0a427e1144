//! Pipeline configuration types

use std::path::PathBuf;

use crate::colorization::training::{TrainingConfig, DEFAULT_CHECKPOINT_NAME};
use crate::colorization::visualize::{PreviewConfig, TiffCompression};

/// Configuration for a colorization run
#[derive(Clone)]
pub struct PipelineConfig {
    /// Directory CIFAR-10 is cached in
    pub data_root: PathBuf,
    /// Whether a missing dataset may be downloaded
    pub download: bool,
    /// Number of leading samples used for training
    pub train_size: usize,
    /// Number of samples right after the training range used for validation
    pub val_size: usize,
    /// Directory receiving the checkpoint, config, history and images
    pub output_dir: PathBuf,
    /// Checkpoint file stem (the recorder adds `.mpk`)
    pub checkpoint_name: String,
    /// Checkpoint to load before training, for resumed runs
    pub resume_from: Option<PathBuf>,
    /// Dataset indices shown in the preview grid
    pub preview_indices: Vec<usize>,
    /// Nearest-neighbour upscale factor for preview tiles
    pub preview_scale: usize,
    pub preview: PreviewConfig,
    /// Whether to render the loss curve PNG
    pub render_plots: bool,
    pub training: TrainingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            download: true,
            train_size: 45_000,
            val_size: 5_000,
            output_dir: PathBuf::from("."),
            checkpoint_name: DEFAULT_CHECKPOINT_NAME.to_string(),
            resume_from: None,
            preview_indices: vec![49_500, 49_501, 49_502],
            preview_scale: 4,
            preview: PreviewConfig::default(),
            render_plots: true,
            training: TrainingConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.output_dir.join(&self.checkpoint_name)
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    data_root: Option<PathBuf>,
    download: Option<bool>,
    train_size: Option<usize>,
    val_size: Option<usize>,
    output_dir: Option<PathBuf>,
    checkpoint_name: Option<String>,
    resume_from: Option<Option<PathBuf>>,
    preview_indices: Option<Vec<usize>>,
    preview_scale: Option<usize>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    render_plots: Option<bool>,
    training: Option<TrainingConfig>,
}

impl PipelineConfigBuilder {
    pub fn data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = Some(root.into());
        self
    }

    pub fn download(mut self, enable: bool) -> Self {
        self.download = Some(enable);
        self
    }

    pub fn split(mut self, train_size: usize, val_size: usize) -> Self {
        self.train_size = Some(train_size);
        self.val_size = Some(val_size);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn checkpoint_name(mut self, name: impl Into<String>) -> Self {
        self.checkpoint_name = Some(name.into());
        self
    }

    pub fn resume_from(mut self, checkpoint: Option<PathBuf>) -> Self {
        self.resume_from = Some(checkpoint);
        self
    }

    pub fn preview_indices(mut self, indices: Vec<usize>) -> Self {
        self.preview_indices = Some(indices);
        self
    }

    pub fn preview_scale(mut self, scale: usize) -> Self {
        self.preview_scale = Some(scale);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn render_plots(mut self, enable: bool) -> Self {
        self.render_plots = Some(enable);
        self
    }

    pub fn training(mut self, training: TrainingConfig) -> Self {
        self.training = Some(training);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            data_root: self.data_root.unwrap_or(default.data_root),
            download: self.download.unwrap_or(default.download),
            train_size: self.train_size.unwrap_or(default.train_size),
            val_size: self.val_size.unwrap_or(default.val_size),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            checkpoint_name: self.checkpoint_name.unwrap_or(default.checkpoint_name),
            resume_from: self.resume_from.unwrap_or(default.resume_from),
            preview_indices: self.preview_indices.unwrap_or(default.preview_indices),
            preview_scale: self.preview_scale.unwrap_or(default.preview_scale),
            preview: PreviewConfig {
                compression: self.compression.unwrap_or(default.preview.compression),
                predictor: self.predictor.unwrap_or(default.preview.predictor),
            },
            render_plots: self.render_plots.unwrap_or(default.render_plots),
            training: self.training.unwrap_or(default.training),
        }
    }
}
