//! JPEG normalization
//!
//! - JPEG input is validated and returned untouched
//! - WebP (and any other decodable raster format) is flattened to RGB and
//!   re-encoded as JPEG, dropping the alpha channel

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use super::{ConversionError, ConversionResult};

/// JPEG quality used when re-encoding
pub const JPEG_QUALITY: u8 = 90;

/// What the input bytes were before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    WebP,
    Png,
    Gif,
    Bmp,
}

impl SourceFormat {
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            ImageFormat::WebP => Some(SourceFormat::WebP),
            ImageFormat::Png => Some(SourceFormat::Png),
            ImageFormat::Gif => Some(SourceFormat::Gif),
            ImageFormat::Bmp => Some(SourceFormat::Bmp),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::WebP => ImageFormat::WebP,
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Gif => ImageFormat::Gif,
            SourceFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::WebP => "WebP",
            SourceFormat::Png => "PNG",
            SourceFormat::Gif => "GIF",
            SourceFormat::Bmp => "BMP",
        }
    }
}

/// Detects the image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Option<SourceFormat> {
    image::guess_format(bytes).ok().and_then(SourceFormat::from_image_format)
}

/// Ensures `bytes` is JPEG.
///
/// Returns the (possibly re-encoded) bytes together with the detected source
/// format. Unrecognized or corrupt input is an error.
pub fn normalize_to_jpeg(bytes: &[u8]) -> ConversionResult<(Vec<u8>, SourceFormat)> {
    let format = detect_format(bytes).ok_or(ConversionError::UnknownFormat)?;

    let decoded = image::load_from_memory_with_format(bytes, format.image_format()).map_err(|source| {
        ConversionError::Decode {
            format: format.name(),
            source,
        }
    })?;

    if format == SourceFormat::Jpeg {
        return Ok((bytes.to_vec(), format));
    }

    let jpeg = encode_rgb_jpeg(decoded)?;
    if format == SourceFormat::WebP {
        log::info!("Converted WebP image to JPEG format");
    } else {
        log::info!("Converted {} image to JPEG format", format.name());
    }

    Ok((jpeg, format))
}

/// Runs [`normalize_to_jpeg`] on the blocking pool.
pub async fn normalize_to_jpeg_blocking(bytes: Vec<u8>) -> ConversionResult<(Vec<u8>, SourceFormat)> {
    tokio::task::spawn_blocking(move || normalize_to_jpeg(&bytes)).await?
}

fn encode_rgb_jpeg(image: DynamicImage) -> ConversionResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(ConversionError::Encode)?;
    Ok(out)
}
