//! Pipeline module
//!
//! Orchestrates a full run: load CIFAR-10, convert to Lab, split, train,
//! save the checkpoint and render the visualisations.

mod colorization_pipeline;
mod timing;
pub mod config;


pub use colorization_pipeline::{ColorizationPipeline, PipelineReport};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use timing::{PipelineTimings, StageTiming, Timer};
