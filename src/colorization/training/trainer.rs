use std::time::Instant;

use burn::{
    data::{dataloader::DataLoaderBuilder, dataset::Dataset},
    module::AutodiffModule,
    nn::loss::{MseLoss, Reduction},
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::{ElementConversion, backend::AutodiffBackend},
};
use tracing::{debug, info, info_span, instrument};

use crate::colorization::dataset::{ColorBatcher, LabDataset};
use crate::colorization::model::ColorNet;
use crate::colorization::training::config::TrainingConfig;
use crate::colorization::training::history::TrainingHistory;

/// Trains `model` on `train`, validating on `valid` after every epoch.
///
/// Epochs are numbered `start_epoch .. start_epoch + num_epochs`. Each batch
/// runs forward, mean-squared-error loss, backward and one Adam step. The
/// validation pass uses the inner (non-autodiff) backend so batch norm runs
/// on its running statistics.
#[instrument(skip_all, fields(train = train.len(), valid = valid.len()))]
pub fn train<B: AutodiffBackend>(
    model: ColorNet<B>,
    train: LabDataset,
    valid: LabDataset,
    config: &TrainingConfig,
    device: &B::Device,
) -> (ColorNet<B>, TrainingHistory) {
    B::seed(config.seed);

    let loader_train = DataLoaderBuilder::new(ColorBatcher::<B>::new(device.clone()))
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(config.num_workers)
        .build(train);

    let loader_valid = DataLoaderBuilder::new(ColorBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(config.val_batch_size)
        .shuffle(config.seed)
        .num_workers(config.num_workers)
        .build(valid);

    let mut optimizer = config.optimizer.init();
    let mut model = model;
    let mut history = TrainingHistory::new();
    let loss_fn = MseLoss::new();

    info!(
        epochs = config.num_epochs,
        start = config.start_epoch,
        lr = config.learning_rate,
        batch_size = config.batch_size,
        "Starting training"
    );

    for epoch in config.start_epoch..config.start_epoch + config.num_epochs {
        let _span = info_span!("train_epoch", epoch).entered();
        let started = Instant::now();

        let mut train_sum = 0.0f64;
        let mut train_batches = 0usize;
        for (iteration, batch) in loader_train.iter().enumerate() {
            let output = model.forward(batch.lightness);
            let loss = loss_fn.forward(output, batch.chroma, Reduction::Mean);
            let loss_value: f64 = loss.clone().into_scalar().elem();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(config.learning_rate, model, grads);

            debug!(iteration, training_loss = loss_value);
            train_sum += loss_value;
            train_batches += 1;
        }

        let model_valid = model.valid();
        let mut val_sum = 0.0f64;
        let mut val_batches = 0usize;
        for batch in loader_valid.iter() {
            let output = model_valid.forward(batch.lightness);
            let loss = loss_fn.forward(output, batch.chroma, Reduction::Mean);
            val_sum += loss.into_scalar().elem::<f64>();
            val_batches += 1;
        }

        let train_loss = train_sum / train_batches.max(1) as f64;
        let val_loss = val_sum / val_batches.max(1) as f64;
        history.record(epoch, train_loss, val_loss, started.elapsed());

        info!(epoch, train_loss, val_loss, "Epoch complete");
    }

    (model, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use crate::colorization::cifar::IMAGE_PIXELS;
    use crate::colorization::lab::LabSample;
    use crate::colorization::model::ColorNetConfig;
    use burn::optim::AdamConfig;

    type TestBackend = Autodiff<NdArray<f32>>;

    fn tinted_samples(n: usize) -> Vec<LabSample> {
        (0..n)
            .map(|i| LabSample {
                lightness: (0..IMAGE_PIXELS).map(|p| ((p + i) % 100) as f32).collect(),
                chroma: [vec![20.0; IMAGE_PIXELS], vec![-15.0; IMAGE_PIXELS]].concat(),
            })
            .collect()
    }

    fn small_config(epochs: usize) -> TrainingConfig {
        let model = ColorNetConfig::new()
            .with_conv1_channels(4)
            .with_conv2_channels(8)
            .with_conv3_channels(8)
            .with_bottleneck_channels(16);
        TrainingConfig::new(model, AdamConfig::new())
            .with_num_epochs(epochs)
            .with_batch_size(4)
            .with_val_batch_size(2)
            .with_learning_rate(1.0e-2)
    }

    #[test]
    fn records_one_entry_per_epoch() {
        let device = Default::default();
        let config = small_config(2).with_start_epoch(5);
        let model = config.model.init::<TestBackend>(&device);
        let (train_set, valid_set) = LabDataset::split(tinted_samples(10), 8, 2).unwrap();

        let (_, history) = train(model, train_set, valid_set, &config, &device);

        let epochs: Vec<usize> = history.epochs().iter().map(|e| e.epoch).collect();
        assert_eq!(epochs, vec![5, 6]);
        assert!(history.epochs().iter().all(|e| e.train_loss.is_finite() && e.val_loss.is_finite()));
    }

    #[test]
    fn training_loss_decreases_on_constant_tint() {
        let device = Default::default();
        let config = small_config(10);
        let model = config.model.init::<TestBackend>(&device);
        let (train_set, valid_set) = LabDataset::split(tinted_samples(10), 8, 2).unwrap();

        let (_, history) = train(model, train_set, valid_set, &config, &device);

        let losses = history.train_losses();
        assert!(losses[losses.len() - 1] < losses[0], "losses: {:?}", losses);
    }
}
