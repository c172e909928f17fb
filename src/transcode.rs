//! Image conversion to WebP.
//!
//! The decoder is chosen from the file's leading bytes, so a PNG saved as
//! `.jpg` still converts. Codec settings are fixed for every file. Images
//! whose color type the encoder cannot take directly are widened to RGBA
//! first so transparency survives.

use crate::error::{AssetError, AssetResult};
use crate::scanner::AssetFile;
use image::{DynamicImage, ImageReader};
use std::fs;

pub const WEBP_QUALITY: f32 = 85.0;
/// Compression effort, 0 (fast) to 6 (smallest output).
pub const WEBP_METHOD: i32 = 6;

/// Converts one asset into its sibling output file.
///
/// Implementations must leave the input file untouched, whether or not
/// conversion succeeds.
pub trait Transcoder {
    fn transcode(&self, asset: &AssetFile) -> AssetResult<AssetFile>;
}

/// Lossy WebP encoder backed by libwebp.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpTranscoder;

impl Transcoder for WebpTranscoder {
    fn transcode(&self, asset: &AssetFile) -> AssetResult<AssetFile> {
        let image = ImageReader::open(&asset.path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|e| AssetError::transcode(&asset.path, e))?
            .decode()
            .map_err(|e| AssetError::transcode(&asset.path, e))?;
        let image = normalize(image);
        let encoded = encode_webp(&image).map_err(|e| AssetError::transcode(&asset.path, e))?;

        let converted = asset.converted();
        if let Err(e) = fs::write(&converted.path, encoded) {
            let _ = fs::remove_file(&converted.path);
            return Err(AssetError::transcode(&asset.path, e));
        }
        Ok(converted)
    }
}

/// Widens anything other than 8-bit RGB or RGBA to 8-bit RGBA.
pub fn normalize(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

fn encode_webp(image: &DynamicImage) -> Result<Vec<u8>, String> {
    let encoder = webp::Encoder::from_image(image).map_err(str::to_string)?;

    let mut config = webp::WebPConfig::new()
        .map_err(|()| "libwebp rejected the default encoder config".to_string())?;
    config.lossless = 0;
    config.quality = WEBP_QUALITY;
    config.method = WEBP_METHOD;

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| format!("encoding failed: {e:?}"))?;
    Ok(memory.to_vec())
}
