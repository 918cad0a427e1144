use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorizeError {
    #[error("Failed to read dataset: {0}")]
    DatasetReadError(String),

    #[error("Failed to download dataset: {0}")]
    DownloadError(String),

    #[error("Failed to decode CIFAR-10 batch: {0}")]
    DecodeError(String),

    #[error("Invalid dataset split: train={train}, val={val}, available={available}")]
    InvalidSplit {
        train: usize,
        val: usize,
        available: usize,
    },

    #[error("Preview index {index} is outside the dataset ({len} samples)")]
    InvalidPreviewIndex { index: usize, len: usize },

    #[error("Tensor data error: {0}")]
    TensorError(String),

    #[error("Checkpoint error: {0}")]
    CheckpointError(String),

    #[error("Failed to render plot: {0}")]
    PlotError(String),

    #[error("Failed to encode preview image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ColorizeError>;
