use std::io::Write;
use crate::colorization::common::error::Result;
use crate::colorization::visualize::types::{PreviewConfig, PreviewGrid};

pub trait PreviewWriter {
    fn write_preview(&self, grid: &PreviewGrid, output: &mut dyn Write, config: &PreviewConfig) -> Result<()>;
}
