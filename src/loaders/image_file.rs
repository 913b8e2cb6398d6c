use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use log::{debug, info};

use crate::error::{ClientError, Result};
use crate::math::Rgb;
use crate::types::ImageDescriptor;

/// Decode in-memory image bytes, any format the `image` crate recognizes
pub fn decode_image(bytes: &[u8]) -> Result<ImageDescriptor> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|source| ClientError::Decode { path: None, source })?;
    to_descriptor(decoded, None)
}

/// Load and decode an image file
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageDescriptor> {
    let path = path.as_ref();
    debug!("Loading image: {:?}", path);

    let bytes = std::fs::read(path).map_err(|source| ClientError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|source| ClientError::Decode {
        path: Some(path.to_path_buf()),
        source,
    })?;

    let descriptor = to_descriptor(decoded, Some(path))?;
    info!(
        "Loaded image {:?}: {}x{} ({} pixels)",
        path,
        descriptor.width(),
        descriptor.height(),
        descriptor.pixel_count()
    );
    Ok(descriptor)
}

/// Normalize any channel layout (gray, alpha, palette, 16-bit) to 8-bit RGB
fn to_descriptor(decoded: image::DynamicImage, path: Option<&Path>) -> Result<ImageDescriptor> {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let colors: Vec<Rgb> = rgb
        .pixels()
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();

    ImageDescriptor::from_colors(width, height, &colors).ok_or_else(|| ClientError::Decode {
        path: path.map(Path::to_path_buf),
        source: image::ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )),
    })
}
