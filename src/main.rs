use anyhow::Context;
use lab_colorizer_rs::colorization::{ColorizationPipeline, PipelineConfig, TiffCompression};
use lab_colorizer_rs::logger;

use tracing::{error, info};

#[cfg(not(feature = "wgpu"))]
type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray<f32>>;
#[cfg(feature = "wgpu")]
type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting lab_colorizer...");

    let config = PipelineConfig::builder()
        .data_root("data")
        .download(true)
        .output_dir("output")
        .compression(TiffCompression::Deflate)
        .build();
    let pipeline = ColorizationPipeline::new(config);

    info!(
        "Training on {} images, validating on {}",
        pipeline.config().train_size,
        pipeline.config().val_size
    );
    info!(
        "Epochs: {}, learning rate: {}, batch size: {}",
        pipeline.config().training.num_epochs,
        pipeline.config().training.learning_rate,
        pipeline.config().training.batch_size
    );

    let device = Default::default();
    let report = pipeline
        .run::<TrainBackend>(&device)
        .inspect_err(|e| error!("Run failed: {}", e))
        .context("colorization run failed")?;

    info!("Checkpoint: {}.mpk", report.checkpoint.display());
    if let Some(preview) = &report.preview {
        info!("Preview: {}", preview.display());
    }
    if let Some(plot) = &report.loss_plot {
        info!("Loss curves: {}", plot.display());
    }

    Ok(())
}
