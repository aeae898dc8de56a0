//! Image-to-JPEG normalization
//!
//! Decoding, color flattening onto white, bounded downscaling and JPEG
//! encoding. Everything here works in memory; nothing touches the package.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};

use crate::config::defaults::BACKGROUND_COLOR;
use crate::error::ImageError;

/// An image ready for JPEG encoding
#[derive(Debug)]
pub struct Normalized {
    pub image: RgbImage,
    /// Dimensions after decoding, before any resize
    pub original_dimensions: (u32, u32),
    /// New dimensions, if the image was scaled down
    pub resized: Option<(u32, u32)>,
}

/// Decode image bytes, sniffing the format from content and falling back to
/// the file extension.
pub fn decode(bytes: &[u8], extension: Option<&str>) -> Result<DynamicImage, ImageError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::Read)?;
    if reader.format().is_none() {
        if let Some(format) = extension.and_then(ImageFormat::from_extension) {
            reader.set_format(format);
        }
    }
    reader.decode().map_err(ImageError::Decode)
}

/// Flatten to 8-bit RGB. Images with an alpha channel are composited over a
/// white canvas using alpha as the blend mask; others are converted directly.
pub fn flatten(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.into_rgb8(),
        };
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height, Rgb(BACKGROUND_COLOR));
    for (out, src) in canvas.pixels_mut().zip(rgba.pixels()) {
        let alpha = u32::from(src[3]);
        for c in 0..3 {
            out[c] = blend(src[c], out[c], alpha);
        }
    }
    canvas
}

fn blend(fg: u8, bg: u8, alpha: u32) -> u8 {
    ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
}

/// Dimensions after fitting the larger side into `max_dimension`, or `None`
/// if the image already fits. Both sides share one ratio and are rounded to
/// the nearest pixel.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let largest = width.max(height);
    if largest <= max_dimension {
        return None;
    }

    let ratio = f64::from(max_dimension) / f64::from(largest);
    let scale = |dim: u32| ((f64::from(dim) * ratio).round() as u32).max(1);
    Some((scale(width), scale(height)))
}

/// Flatten and, if needed, downscale with a Lanczos3 filter
pub fn normalize(image: DynamicImage, max_dimension: u32) -> Normalized {
    let original_dimensions = (image.width(), image.height());
    let rgb = flatten(image);

    match target_dimensions(original_dimensions.0, original_dimensions.1, max_dimension) {
        Some((width, height)) => Normalized {
            image: image::imageops::resize(&rgb, width, height, FilterType::Lanczos3),
            original_dimensions,
            resized: Some((width, height)),
        },
        None => Normalized {
            image: rgb,
            original_dimensions,
            resized: None,
        },
    }
}

/// Encode as baseline JPEG. Quality outside 1-100 is clamped by the encoder.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(image).map_err(ImageError::Encode)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, Rgba, RgbaImage};

    fn noisy_rgb(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(40503)) >> 7;
            Rgb([v as u8, (v >> 8) as u8, (x * 3 + y) as u8])
        })
    }

    fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_target_dimensions_within_limit() {
        assert_eq!(target_dimensions(1920, 1080, 1920), None);
        assert_eq!(target_dimensions(10, 10, 1920), None);
    }

    #[test]
    fn test_target_dimensions_landscape() {
        assert_eq!(target_dimensions(4000, 3000, 1920), Some((1920, 1440)));
    }

    #[test]
    fn test_target_dimensions_portrait_rounds() {
        // 1000 * (300 / 2999) = 100.03 -> 100
        assert_eq!(target_dimensions(1000, 2999, 300), Some((100, 300)));
        // 1001 * 0.5 = 500.5 -> 501
        assert_eq!(target_dimensions(1001, 4000, 2000), Some((501, 2000)));
    }

    #[test]
    fn test_target_dimensions_never_zero() {
        assert_eq!(target_dimensions(5000, 1, 100), Some((100, 1)));
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        rgba.put_pixel(1, 1, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(2, 2, Rgba([0, 0, 0, 128]));

        let rgb = flatten(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([10, 20, 30]));
        assert_eq!(rgb.get_pixel(2, 2), &Rgb([127, 127, 127]));
    }

    #[test]
    fn test_flatten_gray_alpha() {
        let image = image::ImageBuffer::from_pixel(2, 2, LumaA([0u8, 0]));
        let rgb = flatten(DynamicImage::ImageLumaA8(image));
        assert!(rgb.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_flatten_gray_converts_without_blending() {
        let gray = GrayImage::from_pixel(3, 2, Luma([42]));
        let rgb = flatten(DynamicImage::ImageLuma8(gray));
        assert_eq!(rgb.dimensions(), (3, 2));
        assert!(rgb.pixels().all(|p| *p == Rgb([42, 42, 42])));
    }

    #[test]
    fn test_normalize_resizes_large_image() {
        let image = DynamicImage::ImageRgb8(noisy_rgb(400, 300));
        let normalized = normalize(image, 200);
        assert_eq!(normalized.original_dimensions, (400, 300));
        assert_eq!(normalized.resized, Some((200, 150)));
        assert_eq!(normalized.image.dimensions(), (200, 150));
    }

    #[test]
    fn test_normalize_keeps_small_image() {
        let image = DynamicImage::ImageRgb8(noisy_rgb(40, 30));
        let normalized = normalize(image, 1920);
        assert_eq!(normalized.resized, None);
        assert_eq!(normalized.image.dimensions(), (40, 30));
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(&DynamicImage::ImageRgb8(noisy_rgb(8, 6)));
        let decoded = decode(&bytes, Some("png")).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode(b"definitely not an image", Some("png")).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let bytes = encode_jpeg(&noisy_rgb(32, 32), 60).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = decode(&bytes, None).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn test_lower_quality_is_not_larger() {
        let image = noisy_rgb(128, 128);
        let low = encode_jpeg(&image, 20).unwrap();
        let high = encode_jpeg(&image, 95).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn test_out_of_range_quality_is_clamped() {
        let image = noisy_rgb(16, 16);
        assert!(encode_jpeg(&image, 0).is_ok());
        assert!(encode_jpeg(&image, 200).is_ok());
    }
}
