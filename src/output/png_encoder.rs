//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::encode(fb, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Crop to the drawn content plus `pad` pixels, then write to `path`.
    ///
    /// A framebuffer with nothing but `background` is written uncropped.
    /// Returns the size of the written file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if cropping, file creation, or encoding fails.
    pub fn write_tight<P: AsRef<Path>>(
        fb: &Framebuffer,
        path: P,
        background: Rgba,
        pad: u32,
    ) -> Result<u64> {
        let bytes = match fb.content_bounds(background) {
            Some(bounds) => {
                let region = bounds.expand(pad, fb.width(), fb.height());
                Self::to_bytes(&fb.crop(region)?)?
            }
            None => Self::to_bytes(fb)?,
        };

        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }

    fn encode<W: Write>(fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        // Use compact pixels to handle stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;

        Ok(())
    }
}
