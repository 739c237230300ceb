//! TIFF still-image reader.
//!
//! Decoding itself is done by the `tiff` crate; this adapter only reduces the
//! decoded samples to the 8-bit RGB raster the samplers work on. 16-bit
//! samples keep their high byte, alpha is dropped and grayscale is expanded to
//! three equal channels.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::reader::RasterReader;
use crate::probe_pipeline::raster::types::RgbRaster;

/// Still-image reader backed by the `tiff` crate.
pub struct TiffRasterReader;

impl RasterReader for TiffRasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<RgbRaster> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| ProbeError::ImageDecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ProbeError::ImageDecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| ProbeError::ImageDecodeError(e.to_string()))?;
        let decoded = decoder
            .read_image()
            .map_err(|e| ProbeError::ImageDecodeError(e.to_string()))?;

        debug!("Decoded image: {}x{} {:?}", width, height, color_type);

        let rgb = match (color_type, decoded) {
            (ColorType::RGB(8), DecodingResult::U8(buf)) => buf,
            (ColorType::RGBA(8), DecodingResult::U8(buf)) => drop_alpha(&buf),
            (ColorType::Gray(8), DecodingResult::U8(buf)) => expand_gray(&buf),
            (ColorType::RGB(16), DecodingResult::U16(buf)) => high_bytes(&buf),
            (ColorType::RGBA(16), DecodingResult::U16(buf)) => drop_alpha(&high_bytes(&buf)),
            (ColorType::Gray(16), DecodingResult::U16(buf)) => expand_gray(&high_bytes(&buf)),
            (ct, _) => {
                return Err(ProbeError::ImageDecodeError(format!(
                    "unsupported TIFF color type: {:?}",
                    ct
                )));
            }
        };

        RgbRaster::from_rgb8(width, height, rgb)
    }
}

fn high_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().map(|&v| (v >> 8) as u8).collect()
}

fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect()
}

fn expand_gray(gray: &[u8]) -> Vec<u8> {
    gray.iter().flat_map(|&v| [v, v, v]).collect()
}
