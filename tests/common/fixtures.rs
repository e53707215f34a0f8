use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;
use tempfile::NamedTempFile;
use uxlens::{Button, ButtonKind, TextElement};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BUTTON_BLUE: Rgb<u8> = Rgb([60, 140, 230]);

/// Solid white page of the given size
pub fn blank_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

/// White page with one solid-filled rectangle drawn on it
pub fn page_with_button(width: u32, height: u32, x: i32, y: i32, w: u32, h: u32) -> RgbImage {
    let mut page = blank_page(width, height);
    draw_filled_rect_mut(&mut page, Rect::at(x, y).of_size(w, h), BUTTON_BLUE);
    page
}

/// Encode an image as PNG bytes, as an upload would carry it
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes
}

/// Write an image to a temp PNG file that is removed on drop
pub fn png_file(img: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

pub fn text(label: &str, x: i32, y: i32, width: u32, height: u32) -> TextElement {
    TextElement {
        text: label.to_string(),
        x,
        y,
        width,
        height,
        confidence: 90.0,
    }
}

pub fn button(x: i32, y: i32, width: u32, height: u32, label: &str, kind: ButtonKind) -> Button {
    Button::new(x, y, width, height, label, kind).expect("test buttons have non-zero size")
}
