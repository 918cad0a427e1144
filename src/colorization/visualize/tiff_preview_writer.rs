use std::io::Write;
use tracing::debug;
use crate::colorization::common::error::{Result, ColorizeError};
use crate::colorization::visualize::preview_writer::PreviewWriter;
use crate::colorization::visualize::types::{PreviewConfig, PreviewGrid, TiffCompression};

/// Encodes the preview grid as an RGB8 TIFF.
pub struct TiffPreviewWriter;

impl PreviewWriter for TiffPreviewWriter {
    fn write_preview(&self, grid: &PreviewGrid, output: &mut dyn Write, config: &PreviewConfig) -> Result<()> {
        debug!("Encoding preview TIFF: {}x{}", grid.width, grid.height);

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        };

        let mut buffer = Vec::new();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ColorizeError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder.write_image::<tiff::encoder::colortype::RGB8>(
            grid.width as u32,
            grid.height as u32,
            &grid.data,
        ).map_err(|e| ColorizeError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorization::cifar::IMAGE_PIXELS;
    use crate::colorization::visualize::types::PreviewRow;

    fn grid() -> PreviewGrid {
        let row = PreviewRow {
            input: vec![10; IMAGE_PIXELS * 3],
            prediction: vec![120; IMAGE_PIXELS * 3],
            ground: vec![240; IMAGE_PIXELS * 3],
        };
        PreviewGrid::compose(&[row.clone(), row], 2)
    }

    fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<u8>) {
        let mut decoder = tiff::decoder::Decoder::new(std::io::Cursor::new(bytes)).unwrap();
        let (w, h) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => (w, h, data),
            _ => panic!("expected 8-bit samples"),
        }
    }

    #[test]
    fn every_compression_decodes_to_the_grid() {
        let grid = grid();
        for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
            let config = PreviewConfig { compression, predictor: Some(2) };
            let mut out = Vec::new();
            TiffPreviewWriter.write_preview(&grid, &mut out, &config).unwrap();

            let (w, h, data) = decode(out);
            assert_eq!((w as usize, h as usize), (grid.width, grid.height));
            assert_eq!(data, grid.data, "{:?}", compression);
        }
    }

    #[test]
    fn predictor_can_be_disabled() {
        let config = PreviewConfig { compression: TiffCompression::Lzw, predictor: None };
        let mut out = Vec::new();
        TiffPreviewWriter.write_preview(&grid(), &mut out, &config).unwrap();
        assert!(!out.is_empty());
    }
}
