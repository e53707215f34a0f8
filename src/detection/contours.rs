use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::models::Region;

/// Bounding boxes of the outermost contours in a binary edge image.
/// Contours nested inside another contour's hole are ignored.
pub fn find_external_regions(edges: &GrayImage) -> Vec<Region> {
    find_contours::<u32>(edges)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
        .filter_map(|contour| Region::from_points(contour.points.iter().map(|p| (p.x, p.y))))
        .collect()
}

/// Count external regions larger than `min_side` in both dimensions
pub fn count_large_regions(edges: &GrayImage, min_side: u32) -> usize {
    find_external_regions(edges)
        .iter()
        .filter(|r| r.width() > min_side && r.height() > min_side)
        .count()
}
