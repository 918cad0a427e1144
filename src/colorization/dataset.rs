//! Burn dataset module
//!
//! Wraps preprocessed Lab samples as a burn `Dataset` and stacks them into
//! input/target tensors for the data loader.

mod lab_dataset;
mod batcher;

pub use lab_dataset::LabDataset;
pub use batcher::{ColorBatch, ColorBatcher};
