//! CIFAR-10 acquisition module
//!
//! Fetches the binary distribution of CIFAR-10 by name, caches it on disk and
//! decodes its batch files into 32x32 RGB images.

mod source;
mod binary;
mod download;
mod cifar10_source;
pub mod types;

pub use source::ImageSource;
pub use binary::{decode_batch, RECORD_BYTES};
pub use download::{ensure_downloaded, CIFAR10_URL};
pub use cifar10_source::Cifar10Source;
pub use types::{CifarImage, Split, IMAGE_SIDE, IMAGE_PIXELS};
