//! Lab colorization module
//!
//! Predicts the a/b chrominance channels of CIFAR-10 images from their
//! L channel. The module is split the same way the run flows: dataset
//! acquisition, Lab preprocessing, burn dataset plumbing, the network,
//! training, visualisation, and the pipeline that orchestrates them.

pub mod cifar;
pub mod common;
pub mod dataset;
pub mod lab;
pub mod model;
pub mod pipeline;
pub mod training;
pub mod visualize;

pub use common::{
    ColorizeError,
    Result,
};

pub use cifar::{
    CifarImage,
    Cifar10Source,
    ImageSource,
    Split,
};

pub use lab::{
    LabSample,
    preprocess,
};

pub use dataset::{
    ColorBatch,
    ColorBatcher,
    LabDataset,
};

pub use model::{
    ColorNet,
    ColorNetConfig,
};

pub use training::{
    EpochStats,
    TrainingConfig,
    TrainingHistory,
};

pub use visualize::{
    PreviewGrid,
    PreviewWriter,
    TiffCompression,
    TiffPreviewWriter,
};

pub use pipeline::{
    ColorizationPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineReport,
};
