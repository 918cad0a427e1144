//! Lab colorspace module
//!
//! Converts sRGB images into a lightness input plane and a two-channel
//! chrominance target, and back again for visualisation.

mod convert;
pub mod types;

pub use convert::{srgb_to_lab, lab_to_srgb};
pub use types::{LabSample, preprocess};
