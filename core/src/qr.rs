//! QR rendering for ticket payloads.
//!
//! The whole payload (checksum included) is serialized to JSON and encoded at error
//! correction level H, which survives roughly 30% damage. That matters for printed
//! tickets scanned at a dim door. The symbol is drawn black on white with a quiet zone
//! and returned as a PNG that can be embedded as a data URL.
//!
//! Decoding and verification are not done here; see [`crate::payload::verify_ticket`].

use crate::error::{TicketError, TicketResult};
use crate::payload::TicketPayload;
use base64::Engine;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Default target width of the rendered image in pixels.
pub const DEFAULT_WIDTH: u32 = 200;

/// Default quiet zone around the symbol, in modules.
pub const DEFAULT_MARGIN: u32 = 2;

const DARK: Luma<u8> = Luma([0x00]);
const LIGHT: Luma<u8> = Luma([0xFF]);

/// Rendering parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrOptions {
    /// Target image width in pixels. Modules are drawn at a whole number of pixels,
    /// so the image is the largest exact multiple that fits (and never smaller than
    /// one pixel per module).
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
}

impl QrOptions {
    /// Options with the given width and margin.
    #[must_use]
    pub const fn new(width: u32, margin: u32) -> Self {
        Self { width, margin }
    }

    /// Same options with a different width.
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Same options with a different margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }
}

impl Default for QrOptions {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_MARGIN)
    }
}

/// A rendered QR code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrImage {
    png: Vec<u8>,
    width: u32,
    modules: u32,
}

impl QrImage {
    /// PNG bytes.
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume the image, returning the PNG bytes.
    #[must_use]
    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Image width (and height) in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Symbol width in modules, excluding the quiet zone.
    #[must_use]
    pub const fn modules(&self) -> u32 {
        self.modules
    }

    /// MIME type of the image.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        "image/png"
    }

    /// Self-contained `data:image/png;base64,...` URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.png);
        format!("data:{};base64,{encoded}", self.mime_type())
    }
}

/// Encode a ticket payload with the default options.
///
/// # Errors
///
/// - [`TicketError::PayloadTooLarge`] if the JSON exceeds QR capacity at level H
/// - [`TicketError::ImageEncoding`] if the PNG cannot be written
pub fn encode_qr(payload: &TicketPayload) -> TicketResult<QrImage> {
    encode_qr_with(payload, &QrOptions::default())
}

/// Encode a ticket payload with explicit options.
///
/// # Errors
///
/// Same as [`encode_qr`].
pub fn encode_qr_with(payload: &TicketPayload, options: &QrOptions) -> TicketResult<QrImage> {
    let text = payload.to_qr_text()?;
    let image = encode_text(&text, options)?;

    tracing::debug!(
        ticket_id = %payload.id,
        bytes = text.len(),
        modules = image.modules,
        width = image.width,
        "Ticket QR code rendered"
    );

    Ok(image)
}

/// Encode arbitrary text as a QR PNG at error correction level H.
///
/// # Errors
///
/// Same as [`encode_qr`].
pub fn encode_text(text: &str, options: &QrOptions) -> TicketResult<QrImage> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H).map_err(|e| {
        match e {
            QrError::DataTooLong => TicketError::PayloadTooLarge { len: text.len() },
            other => TicketError::ImageEncoding(other.to_string()),
        }
    })?;

    let image = render(&code, options);
    let width = image.width();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| TicketError::ImageEncoding(e.to_string()))?;

    Ok(QrImage {
        png,
        width,
        modules: u32::try_from(code.width()).unwrap_or(u32::MAX),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn render(code: &QrCode, options: &QrOptions) -> GrayImage {
    let modules = code.width();
    let colors = code.to_colors();
    let quiet = options.margin as usize;
    let span = modules + 2 * quiet;
    let scale = (options.width as usize / span).max(1);
    let side = (span * scale) as u32;

    GrayImage::from_fn(side, side, |x, y| {
        let mx = x as usize / scale;
        let my = y as usize / scale;
        let inside = (quiet..quiet + modules).contains(&mx) && (quiet..quiet + modules).contains(&my);
        if inside && colors[(my - quiet) * modules + (mx - quiet)] == Color::Dark {
            DARK
        } else {
            LIGHT
        }
    })
}
