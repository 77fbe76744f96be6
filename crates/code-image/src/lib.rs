//! Scannable-code rasterization.
//!
//! Exposes the `CodeEncoder` capability so layout and document code can be
//! tested against a fake, plus the production QR implementation.

pub mod qr;

pub use qr::QrEncoder;

/// A square 8-bit grayscale raster: 0 is a dark module, 255 is light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRaster {
    pub width: u32,
    pub pixels: Vec<u8>,
}

impl CodeRaster {
    /// Wrap a pixel buffer; `pixels.len()` must equal `width * width`.
    pub fn new(width: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * width) as usize);
        Self { width, pixels }
    }
}

/// Turns text into a scannable raster.
///
/// Implementations must be deterministic: the same `data` and `target_size`
/// yield byte-identical rasters.
pub trait CodeEncoder: Send + Sync {
    fn encode(&self, data: &str, target_size: u32) -> Result<CodeRaster, EncodeError>;
}

/// Encoding failures. Any failure aborts the whole sheet job.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),
}
