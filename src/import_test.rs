#![allow(clippy::float_cmp)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use super::*;
use crate::element::ElementKind;

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
    let img = if format == ImageFormat::Jpeg { DynamicImage::ImageRgb8(img.to_rgb8()) } else { img };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

// =============================================================
// fit_within
// =============================================================

#[test]
fn small_images_keep_their_size() {
    assert_eq!(fit_within(120, 80, 300.0), (120.0, 80.0));
}

#[test]
fn wide_images_scale_to_max_width() {
    assert_eq!(fit_within(1200, 600, 300.0), (300.0, 150.0));
}

#[test]
fn tall_images_scale_to_max_height() {
    assert_eq!(fit_within(400, 1000, 300.0), (120.0, 300.0));
}

#[test]
fn fitted_sizes_are_rounded() {
    assert_eq!(fit_within(1000, 333, 300.0), (300.0, 100.0));
}

#[test]
fn zero_sized_input_yields_zero() {
    assert_eq!(fit_within(0, 50, 300.0), (0.0, 0.0));
}

// =============================================================
// prepare_image
// =============================================================

#[test]
fn prepare_png_builds_data_uri() {
    let bytes = encoded(600, 200, ImageFormat::Png);
    let img = prepare_image(&bytes, 300.0).unwrap();
    assert_eq!((img.natural_width, img.natural_height), (600, 200));
    assert_eq!((img.width, img.height), (300.0, 100.0));
    assert!(img.src.starts_with("data:image/png;base64,"));
}

#[test]
fn prepare_jpeg_uses_jpeg_mime() {
    let bytes = encoded(40, 20, ImageFormat::Jpeg);
    let img = prepare_image(&bytes, 300.0).unwrap();
    assert!(img.src.starts_with("data:image/jpeg;base64,"));
    assert_eq!((img.width, img.height), (40.0, 20.0));
}

#[test]
fn prepare_rejects_garbage() {
    let err = prepare_image(b"definitely not an image", 300.0).unwrap_err();
    assert!(matches!(err, ImportError::Decode(_)));
}

// =============================================================
// Placement
// =============================================================

#[test]
fn draft_centers_on_point() {
    let bytes = encoded(100, 50, ImageFormat::Png);
    let img = prepare_image(&bytes, 300.0).unwrap();
    let draft = img.draft(Some(Point::new(200.0, 100.0)));
    assert_eq!((draft.x, draft.y, draft.width, draft.height), (150.0, 75.0, 100.0, 50.0));
    assert!(matches!(draft.kind, ElementKind::Image(_)));
}

#[test]
fn draft_defaults_to_canvas_center() {
    let bytes = encoded(100, 50, ImageFormat::Png);
    let img = prepare_image(&bytes, 300.0).unwrap();
    let draft = img.draft(None);
    assert_eq!((draft.x, draft.y), (250.0, 150.0));
}

// =============================================================
// load_image (async)
// =============================================================

#[tokio::test]
async fn load_image_decodes_off_thread() {
    let bytes = encoded(900, 300, ImageFormat::Png);
    let img = load_image(bytes, 300.0).await.unwrap();
    assert_eq!((img.width, img.height), (300.0, 100.0));
}

#[tokio::test]
async fn load_image_reports_decode_failure() {
    let result = load_image(vec![0, 1, 2, 3], 300.0).await;
    assert!(matches!(result, Err(ImportError::Decode(_))));
}
