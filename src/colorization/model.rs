//! Colorization network module
//!
//! A fixed encoder/decoder stack of convolutions, max pooling, nearest
//! upsampling and batch norm that maps a 1x32x32 lightness plane to a
//! 2x32x32 chrominance prediction.

mod color_net;

pub use color_net::{ColorNet, ColorNetConfig};
