//! Document sink — turns a planned sheet into a paginated byte stream.
//!
//! The layout engine stays format-agnostic; this crate owns the PDF
//! encoding. Output is always fully materialized so callers can report an
//! exact byte length before handing it to the transport.

pub mod metrics;
pub mod pdf;

pub use pdf::PdfSink;

use code_image::CodeEncoder;
use sheet_layout::SheetPlan;

/// Media type of the produced document.
pub const PDF_MIME: &str = "application/pdf";

/// Source raster side for code images, in pixels. The placed square is
/// scaled down from this by the page transform.
pub const CODE_RASTER_PX: u32 = 100;

/// Consumes draw batches and produces the final document bytes.
pub trait DocumentSink {
    fn render(&self, plan: &SheetPlan, encoder: &dyn CodeEncoder) -> Result<Vec<u8>, RenderError>;
}

/// Rendering failures. No partial document is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("code encoding failed: {0}")]
    Encode(#[from] code_image::EncodeError),

    #[error("document write failed: {0}")]
    Document(#[from] std::io::Error),
}
