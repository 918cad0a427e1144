use std::path::PathBuf;

use burn::module::AutodiffModule;
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use tracing::{info, instrument};

use crate::colorization::{
    cifar::{Cifar10Source, CifarImage, ImageSource},
    common::error::{ColorizeError, Result},
    dataset::LabDataset,
    lab::{LabSample, preprocess},
    model::ColorNet,
    pipeline::config::PipelineConfig,
    pipeline::timing::{PipelineTimings, Timer},
    training::{load_checkpoint, predict, save_checkpoint, train, TrainingHistory},
    visualize::{plot_losses, PreviewGrid, PreviewRow, PreviewWriter, TiffPreviewWriter},
};

const CONFIG_FILE: &str = "training_config.json";
const HISTORY_FILE: &str = "history.json";
const PREVIEW_FILE: &str = "preview.tiff";
const LOSS_PLOT_FILE: &str = "loss.png";

/// What a finished run produced
#[derive(Debug)]
pub struct PipelineReport {
    pub history: TrainingHistory,
    pub timings: PipelineTimings,
    /// Checkpoint stem; the file on disk carries the recorder's extension
    pub checkpoint: PathBuf,
    pub preview: Option<PathBuf>,
    pub loss_plot: Option<PathBuf>,
}

pub struct ColorizationPipeline<S: ImageSource, W: PreviewWriter> {
    source: S,
    writer: W,
    config: PipelineConfig,
}

impl ColorizationPipeline<Cifar10Source, TiffPreviewWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            source: Cifar10Source::new(config.data_root.clone(), config.download),
            writer: TiffPreviewWriter,
            config,
        }
    }
}

impl<S: ImageSource, W: PreviewWriter> ColorizationPipeline<S, W> {
    pub fn with_custom(source: S, writer: W, config: PipelineConfig) -> Self {
        Self {
            source,
            writer,
            config,
        }
    }

    fn validate_preview_indices(&self, len: usize) -> Result<()> {
        match self.config.preview_indices.iter().find(|&&i| i >= len) {
            Some(&index) => Err(ColorizeError::InvalidPreviewIndex { index, len }),
            None => Ok(()),
        }
    }

    /// Runs load -> preprocess -> split -> train -> checkpoint -> visualise.
    #[instrument(skip_all, fields(output = %self.config.output_dir.display()))]
    pub fn run<B: AutodiffBackend>(&self, device: &B::Device) -> Result<PipelineReport> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let mut timings = PipelineTimings::new();

        let images = {
            let _span = tracing::info_span!("load").entered();
            let timer = Timer::start("load");
            let images = self.source.load_images()?;
            images.iter().try_for_each(CifarImage::validate)?;
            timings.record(timer);
            images
        };

        let samples = {
            let _span = tracing::info_span!("preprocess", count = images.len()).entered();
            let timer = Timer::start("preprocess");
            let samples = preprocess(&images);
            timings.record(timer);
            samples
        };
        drop(images);

        self.validate_preview_indices(samples.len())?;
        let preview_samples: Vec<LabSample> = self
            .config
            .preview_indices
            .iter()
            .map(|&i| samples[i].clone())
            .collect();

        let (train_set, valid_set) =
            LabDataset::split(samples, self.config.train_size, self.config.val_size)?;

        let mut model = self.config.training.model.init::<B>(device);
        if let Some(checkpoint) = &self.config.resume_from {
            model = load_checkpoint(model, checkpoint, device)?;
        }
        info!(params = model.num_params(), "Model initialised");

        let (model, history) = {
            let _span = tracing::info_span!("train").entered();
            let timer = Timer::start("train");
            let trained = train(model, train_set, valid_set, &self.config.training, device);
            timings.record(timer);
            trained
        };

        let checkpoint = self.config.checkpoint_path();
        {
            let _span = tracing::info_span!("checkpoint").entered();
            let timer = Timer::start("checkpoint");
            save_checkpoint(&model, &checkpoint)?;
            self.config.training.save(self.config.output_dir.join(CONFIG_FILE))?;
            history.save_json(self.config.output_dir.join(HISTORY_FILE))?;
            timings.record(timer);
        }

        let (preview, loss_plot) = {
            let _span = tracing::info_span!("visualize").entered();
            let timer = Timer::start("visualize");
            let preview = self.write_preview::<B::InnerBackend>(&model.valid(), &preview_samples, device)?;
            let loss_plot = if self.config.render_plots {
                let path = self.config.output_dir.join(LOSS_PLOT_FILE);
                plot_losses(&history, &path)?;
                Some(path)
            } else {
                None
            };
            timings.record(timer);
            (preview, loss_plot)
        };

        timings.log_summary();
        if let Some(last) = history.last() {
            info!(
                epoch = last.epoch,
                train_loss = last.train_loss,
                val_loss = last.val_loss,
                "Run complete"
            );
        }

        Ok(PipelineReport {
            history,
            timings,
            checkpoint,
            preview,
            loss_plot,
        })
    }

    fn write_preview<B: Backend>(
        &self,
        model: &ColorNet<B>,
        samples: &[LabSample],
        device: &B::Device,
    ) -> Result<Option<PathBuf>> {
        if samples.is_empty() {
            return Ok(None);
        }

        let predictions = predict(model, samples, device)?;
        let rows: Vec<PreviewRow> = samples
            .iter()
            .zip(&predictions)
            .map(|(sample, chroma)| PreviewRow {
                input: sample.lightness_rgb8(),
                prediction: sample.to_rgb8(chroma),
                ground: sample.ground_truth_rgb8(),
            })
            .collect();
        let grid = PreviewGrid::compose(&rows, self.config.preview_scale);

        let path = self.config.output_dir.join(PREVIEW_FILE);
        let mut file = std::fs::File::create(&path)?;
        self.writer.write_preview(&grid, &mut file, &self.config.preview)?;

        info!(rows = rows.len(), path = %path.display(), "Preview written");
        Ok(Some(path))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
