//! Image import: decode a user-supplied file, fit it, and place it on the canvas.
//!
//! Decoding is the one asynchronous boundary of the editor. [`load_image`]
//! runs the decode on tokio's blocking pool so the event thread never waits
//! on it; its result is handed to
//! [`crate::engine::EngineCore::finish_image_import`], which performs a single
//! `add_element`.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use base64::Engine as _;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::element::{ElementDraft, Rect};
use crate::view::Point;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("image decode task failed: {0}")]
    Join(String),
}

/// A decoded image ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    /// `data:<mime>;base64,...` source for the element.
    pub src: String,
    /// Intrinsic pixel width.
    pub natural_width: u32,
    /// Intrinsic pixel height.
    pub natural_height: u32,
    /// Width after fitting, in canvas units.
    pub width: f64,
    /// Height after fitting, in canvas units.
    pub height: f64,
}

impl ImportedImage {
    /// Image element draft centered on `at`, or on the canvas center when `at` is `None`.
    #[must_use]
    pub fn draft(&self, at: Option<Point>) -> ElementDraft {
        let (x, y) = match at {
            Some(p) => (p.x - self.width / 2.0, p.y - self.height / 2.0),
            None => ((CANVAS_WIDTH - self.width) / 2.0, (CANVAS_HEIGHT - self.height) / 2.0),
        };
        ElementDraft::image(self.src.clone(), Rect::new(x, y, self.width, self.height))
    }
}

/// Scale `(width, height)` down, preserving aspect ratio, so neither exceeds
/// `max_dimension`. Images already small enough keep their size. Results are
/// rounded to whole units.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_dimension: f64) -> (f64, f64) {
    let w = f64::from(width);
    let h = f64::from(height);
    if w <= 0.0 || h <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_dimension / w).min(max_dimension / h).min(1.0);
    ((w * scale).round(), (h * scale).round())
}

/// Decode `bytes`, read the intrinsic size, and build the inline source.
///
/// # Errors
///
/// [`ImportError::Decode`] for unknown or corrupt data, [`ImportError::EmptyImage`]
/// for an image without pixels.
pub fn prepare_image(bytes: &[u8], max_dimension: f64) -> Result<ImportedImage, ImportError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (natural_width, natural_height) = (decoded.width(), decoded.height());
    if natural_width == 0 || natural_height == 0 {
        return Err(ImportError::EmptyImage);
    }

    let (width, height) = fit_within(natural_width, natural_height, max_dimension);
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    let src = format!("data:{};base64,{encoded}", format.to_mime_type());

    Ok(ImportedImage { src, natural_width, natural_height, width, height })
}

/// Decode `bytes` off the calling task on tokio's blocking pool.
///
/// # Errors
///
/// Everything [`prepare_image`] reports, plus [`ImportError::Join`] if the
/// blocking task was cancelled or panicked.
pub async fn load_image(bytes: Vec<u8>, max_dimension: f64) -> Result<ImportedImage, ImportError> {
    tokio::task::spawn_blocking(move || prepare_image(&bytes, max_dimension))
        .await
        .map_err(|e| ImportError::Join(e.to_string()))?
}
