//! Label sheet layout engine.
//!
//! Packs QR tag labels edge-to-edge into fixed-size cells on A4 pages and
//! emits per-page draw instructions. Pure computation: no encoder, no
//! document format, no I/O — those live in `code-image` and `sheet-pdf`.

pub mod geometry;
pub mod plan;

// Re-exports for convenience
pub use geometry::{CellPlacement, PageGeometry};
pub use plan::{DrawOp, LabelRecord, LayoutError, PageBatch, SheetPlan, plan_sheet};

/// Points per centimeter (1 pt = 1/72 inch).
pub const CM_TO_PT: f32 = 72.0 / 2.54;

/// A4 page width in points.
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 page height in points.
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Physical label cell side in centimeters (matches the label stock).
pub const CELL_SIDE_CM: f32 = 1.5;

/// Inset applied on all four sides of a cell, in points.
pub const CELL_PADDING_PT: f32 = 2.0;

/// Font size for the human-readable code line, in points.
pub const LABEL_FONT_PT: f32 = 7.0;

/// Font size for the caption line beneath the code, in points.
pub const CAPTION_FONT_PT: f32 = 5.0;

/// Vertical gap between the label line and the code image, in points.
pub const CODE_GAP_PT: f32 = 2.0;

/// Upper bound for the rendered code square, in points.
pub const TARGET_CODE_SIZE_PT: f32 = 100.0;

/// Caption printed beneath every code.
pub const CAPTION_TEXT: &str = "Scan";
