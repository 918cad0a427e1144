//! Visualisation module
//!
//! Loss curves rendered with plotters and a side-by-side preview grid of
//! input lightness, predicted colours and ground truth written as TIFF.

mod preview_writer;
mod tiff_preview_writer;
mod loss_plot;
pub mod types;

pub use preview_writer::PreviewWriter;
pub use tiff_preview_writer::TiffPreviewWriter;
pub use loss_plot::{plot_losses, loss_axis_ranges};
pub use types::{PreviewConfig, PreviewGrid, PreviewRow, TiffCompression};
