//! Training hyperparameters

use burn::optim::AdamConfig;
use burn::prelude::*;

use crate::colorization::model::ColorNetConfig;

#[derive(Config)]
pub struct TrainingConfig {
    pub model: ColorNetConfig,
    pub optimizer: AdamConfig,
    #[config(default = 100)]
    pub num_epochs: usize,
    /// Epoch number the run starts counting from (non-zero when resuming).
    #[config(default = 0)]
    pub start_epoch: usize,
    #[config(default = 32)]
    pub batch_size: usize,
    #[config(default = 10)]
    pub val_batch_size: usize,
    #[config(default = 0)]
    pub num_workers: usize,
    #[config(default = 2023)]
    pub seed: u64,
    #[config(default = 1.0e-4)]
    pub learning_rate: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(ColorNetConfig::new(), AdamConfig::new())
    }
}
