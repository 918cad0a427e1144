//! Training module
//!
//! The epoch loop, its hyperparameters, per-epoch history, checkpointing,
//! and inference helpers used for visualisation.

pub mod config;
mod history;
mod trainer;
mod checkpoint;
mod inference;

pub use config::TrainingConfig;
pub use history::{EpochStats, TrainingHistory};
pub use trainer::train;
pub use checkpoint::{save_checkpoint, load_checkpoint, DEFAULT_CHECKPOINT_NAME};
pub use inference::predict;
