//! Export boundary: a read-only snapshot of the card handed to an external encoder.
//!
//! The editor never rasterizes anything itself. An export captures the final
//! element tree and the fixed 600×350 canvas region into an [`ExportSnapshot`],
//! picks encoder options for the requested format, and delegates to a
//! [`CardEncoder`] supplied by the host. [`ExportSession`] tracks the
//! pending/in-flight state so a failed export always leaves the user able to
//! retry and never touches editor state.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, EXPORT_PIXEL_RATIO_FACTOR, JPEG_QUALITY};
use crate::doc::DocStore;
use crate::element::Element;
use crate::engine::Notice;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no export requested")]
    NotRequested,
    #[error("encoder failed: {0}")]
    Encoder(String),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
    /// Single page sized exactly to the canvas, with the card embedded as a raster.
    Pdf,
}

impl ExportFormat {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Png => "card.png",
            Self::Jpeg => "card.jpg",
            Self::Pdf => "card.pdf",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Pdf => "application/pdf",
        }
    }

    /// Short uppercase label for notices.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
            Self::Pdf => "PDF",
        }
    }
}

/// Encoder settings for one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Background fill, or `None` for transparent.
    pub background: Option<String>,
    /// Lossy quality in `0.0..=1.0`, JPEG only.
    pub quality: Option<f64>,
    /// Rasterization scale relative to canvas units.
    pub pixel_ratio: f64,
    /// Output page/region width in canvas units.
    pub page_width: f64,
    /// Output page/region height in canvas units.
    pub page_height: f64,
}

impl ExportOptions {
    /// Options for `format` on a display with `device_pixel_ratio`.
    #[must_use]
    pub fn for_format(format: ExportFormat, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() { device_pixel_ratio.max(1.0) } else { 1.0 };
        let (background, quality) = match format {
            ExportFormat::Png => (None, None),
            ExportFormat::Jpeg => (Some("#fff".to_string()), Some(JPEG_QUALITY)),
            ExportFormat::Pdf => (Some("#fff".to_string()), None),
        };
        Self {
            format,
            background,
            quality,
            pixel_ratio: dpr * EXPORT_PIXEL_RATIO_FACTOR,
            page_width: CANVAS_WIDTH,
            page_height: CANVAS_HEIGHT,
        }
    }
}

/// Read-only copy of everything an encoder needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

impl ExportSnapshot {
    #[must_use]
    pub fn from_store(store: &DocStore) -> Self {
        Self { width: CANVAS_WIDTH, height: CANVAS_HEIGHT, elements: store.elements().to_vec() }
    }

    /// Serialize for an encoder living outside the process.
    ///
    /// # Errors
    ///
    /// [`ExportError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Host-provided encoder turning a snapshot into file bytes.
pub trait CardEncoder {
    /// Render `snapshot` into the bytes of one file.
    ///
    /// # Errors
    ///
    /// [`ExportError::Encoder`] with the encoder's failure message.
    fn encode(&self, snapshot: &ExportSnapshot, options: &ExportOptions) -> Result<Vec<u8>, ExportError>;
}

/// A finished export ready to download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Pending/in-flight state of the export dialog.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    pending: Option<ExportFormat>,
    exporting: bool,
}

impl ExportSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the confirmation step for `format`.
    pub fn request(&mut self, format: ExportFormat) {
        self.pending = Some(format);
    }

    /// Dismiss a pending request. Ignored while an export is in flight.
    pub fn cancel(&mut self) {
        if !self.exporting {
            self.pending = None;
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<ExportFormat> {
        self.pending
    }

    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Mark the pending export as in flight and capture what the encoder needs.
    /// Returns `None` when nothing is pending or an export is already running.
    pub fn begin(&mut self, store: &DocStore, device_pixel_ratio: f64) -> Option<(ExportSnapshot, ExportOptions)> {
        if self.exporting {
            return None;
        }
        let format = self.pending?;
        self.exporting = true;
        Some((ExportSnapshot::from_store(store), ExportOptions::for_format(format, device_pixel_ratio)))
    }

    /// Close the in-flight export, clearing pending state whatever the outcome.
    pub fn finish(
        &mut self,
        format: ExportFormat,
        result: Result<Vec<u8>, ExportError>,
    ) -> (Result<ExportArtifact, ExportError>, Notice) {
        self.exporting = false;
        self.pending = None;
        match result {
            Ok(bytes) => {
                info!(format = format.label(), size = bytes.len(), "card exported");
                let notice = Notice::success(format!("Card exported as {}", format.label()));
                let artifact = ExportArtifact { file_name: format.file_name(), mime_type: format.mime_type(), bytes };
                (Ok(artifact), notice)
            }
            Err(e) => {
                error!(error = %e, format = format.label(), "export failed");
                (Err(e), Notice::error("Export failed"))
            }
        }
    }

    /// Run the pending export synchronously through `encoder`.
    pub fn run(
        &mut self,
        store: &DocStore,
        encoder: &dyn CardEncoder,
        device_pixel_ratio: f64,
    ) -> (Result<ExportArtifact, ExportError>, Notice) {
        let Some((snapshot, options)) = self.begin(store, device_pixel_ratio) else {
            return (Err(ExportError::NotRequested), Notice::error("Export failed"));
        };
        let result = encoder.encode(&snapshot, &options);
        self.finish(options.format, result)
    }
}
