use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

use super::canvas::{IndexedCanvas, MAX_PALETTE};

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Displayable image produced from a rasterized overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    /// Self-contained `data:` URI
    pub data_uri: String,
}

impl EncodedImage {
    /// CSS `url(...)` form for a background image
    pub fn css_url(&self) -> String {
        format!("url('{}')", self.data_uri)
    }

    /// Raw encoded bytes behind the data URI
    pub fn payload(&self) -> anyhow::Result<Vec<u8>> {
        let (_, body) = self
            .data_uri
            .split_once(";base64,")
            .context("data URI has no base64 payload")?;
        BASE64_STANDARD.decode(body).context("data URI payload is not base64")
    }
}

/// Turns an indexed canvas into something a panel can display
pub trait ImageEncoder {
    fn encode(&self, canvas: &IndexedCanvas) -> anyhow::Result<EncodedImage>;
}

/// 8-bit indexed PNG (PLTE + tRNS) wrapped in a base64 data URI
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDataUriEncoder;

impl PngDataUriEncoder {
    /// Encode to raw PNG bytes
    pub fn encode_png(&self, canvas: &IndexedCanvas) -> anyhow::Result<Vec<u8>> {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            bail!("cannot encode an empty {width}x{height} image");
        }

        let palette = canvas.palette();
        if palette.is_empty() || palette.len() > MAX_PALETTE {
            bail!("palette holds {} colors, expected 1..={MAX_PALETTE}", palette.len());
        }

        let rgb: Vec<u8> = palette.iter().flat_map(|c| c.rgb()).collect();
        let alpha: Vec<u8> = palette.iter().map(|c| c.a).collect();

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(rgb);
            encoder.set_trns(alpha);

            let mut writer = encoder.write_header().context("writing PNG header")?;
            writer
                .write_image_data(canvas.indices())
                .context("writing PNG image data")?;
            writer.finish().context("finishing PNG stream")?;
        }

        Ok(bytes)
    }
}

impl ImageEncoder for PngDataUriEncoder {
    fn encode(&self, canvas: &IndexedCanvas) -> anyhow::Result<EncodedImage> {
        let bytes = self.encode_png(canvas)?;
        let (width, height) = canvas.dimensions();

        Ok(EncodedImage {
            width,
            height,
            data_uri: format!("{PNG_DATA_URI_PREFIX}{}", BASE64_STANDARD.encode(bytes)),
        })
    }
}
