use image::imageops::FilterType;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::bilateral_filter;
use imageproc::morphology::close;
use tracing::debug;

use crate::config::PreprocessConfig;
use crate::error::AnalysisError;
use crate::models::CanonicalImage;

/// Decode raw upload bytes into the canonical image used by every stage
pub fn preprocess(bytes: &[u8], config: &PreprocessConfig) -> Result<CanonicalImage, AnalysisError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalysisError::EmptyImage { width, height });
    }

    debug!(width, height, "decoded image");

    let resized = downscale(rgb, config.max_width);
    let smoothed = smooth(&resized, config);
    Ok(CanonicalImage::new(smoothed))
}

/// Shrink to `max_width` preserving aspect ratio; narrower images pass through
pub fn downscale(rgb: RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = rgb.dimensions();
    if width <= max_width {
        return rgb;
    }

    let ratio = max_width as f64 / width as f64;
    let new_height = ((height as f64 * ratio) as u32).max(1);
    debug!(width, height, new_width = max_width, new_height, "downscaling");
    image::imageops::resize(&rgb, max_width, new_height, FilterType::Lanczos3)
}

/// Edge-preserving smoothing, applied per colour channel
pub fn smooth(rgb: &RgbImage, config: &PreprocessConfig) -> RgbImage {
    let (width, height) = rgb.dimensions();
    let planes: Vec<GrayImage> = (0..3)
        .map(|channel| {
            let plane = GrayImage::from_fn(width, height, |x, y| Luma([rgb.get_pixel(x, y)[channel]]));
            bilateral_filter(&plane, config.bilateral_window, config.sigma_color, config.sigma_spatial)
        })
        .collect();

    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            planes[0].get_pixel(x, y)[0],
            planes[1].get_pixel(x, y)[0],
            planes[2].get_pixel(x, y)[0],
        ])
    })
}

/// BT.601 luma of an RGB pixel
pub fn luma601(p: &Rgb<u8>) -> f64 {
    0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64
}

/// Convert image to grayscale using BT.601 weights
pub fn to_grayscale(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        Luma([luma601(rgb.get_pixel(x, y)).round().clamp(0.0, 255.0) as u8])
    })
}

/// Detect edges using Canny edge detector
pub fn detect_edges(gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(gray, low_threshold, high_threshold)
}

/// Morphological closing with a square element to bridge broken borders
pub fn close_gaps(edges: &GrayImage, radius: u8) -> GrayImage {
    close(edges, Norm::LInf, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_downscale_preserves_aspect_ratio() {
        let resized = downscale(RgbImage::new(2400, 1000), 1200);
        assert_eq!(resized.dimensions(), (1200, 500));
    }

    #[test]
    fn test_downscale_leaves_small_images() {
        let resized = downscale(RgbImage::new(800, 600), 1200);
        assert_eq!(resized.dimensions(), (800, 600));
    }

    #[test]
    fn test_preprocess_rejects_garbage() {
        let result = preprocess(b"definitely not an image", &PreprocessConfig::default());
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn test_preprocess_keeps_flat_colour() {
        let bytes = png_bytes(RgbImage::from_pixel(40, 30, Rgb([200, 100, 50])));
        let canonical = preprocess(&bytes, &PreprocessConfig::default()).unwrap();
        assert_eq!((canonical.width(), canonical.height()), (40, 30));
        let pixel = canonical.rgb().get_pixel(20, 15);
        for (actual, expected) in pixel.0.iter().zip([200u8, 100, 50]) {
            assert!(actual.abs_diff(expected) <= 1);
        }
    }

    #[test]
    fn test_grayscale_uses_bt601_weights() {
        let mut rgb = RgbImage::from_pixel(3, 1, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([255, 60, 255]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        let gray = to_grayscale(&rgb);
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(1, 0)[0], 141);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn test_closing_bridges_single_pixel_gap() {
        let mut edges = GrayImage::new(20, 5);
        for x in (2..18).filter(|&x| x != 10) {
            edges.put_pixel(x, 2, Luma([255]));
        }
        let closed = close_gaps(&edges, 1);
        assert_eq!(closed.get_pixel(10, 2)[0], 255);
    }
}
