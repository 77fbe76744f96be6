//! Sheet planning — records to per-page draw instructions.
//!
//! `plan_sheet` walks the records in input order, derives each cell from the
//! running index, and emits draw ops grouped per page. Page breaks fall out
//! of the index math; nothing here touches an encoder or a document format.

use crate::geometry::{CellPlacement, PageGeometry};
use crate::{
    CAPTION_FONT_PT, CAPTION_TEXT, CELL_PADDING_PT, CODE_GAP_PT, LABEL_FONT_PT, TARGET_CODE_SIZE_PT,
};

/// One label to place: the short code and the URL its QR encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    pub code: String,
    pub destination_url: String,
}

impl LabelRecord {
    pub fn new(code: impl Into<String>, destination_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            destination_url: destination_url.into(),
        }
    }
}

/// A single draw instruction, in top-left-origin page coordinates (points).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Center `text` horizontally within `[x, x + width]`, top edge at `y`.
    Text {
        x: f32,
        y: f32,
        width: f32,
        font_size: f32,
        text: String,
    },
    /// Square code image: top-left `(x, y)`, side `size`, encoding `data`.
    Code {
        x: f32,
        y: f32,
        size: f32,
        data: String,
    },
}

/// Draw instructions for one page, in record order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBatch {
    pub ops: Vec<DrawOp>,
}

/// The whole planned job: geometry plus one batch per page.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub geometry: PageGeometry,
    pub pages: Vec<PageBatch>,
}

impl SheetPlan {
    /// Total number of draw ops across all pages.
    pub fn op_count(&self) -> usize {
        self.pages.iter().map(|p| p.ops.len()).sum()
    }
}

/// Layout failures.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("no records to render")]
    NothingToRender,
}

/// Plan a label sheet for `records` on the given geometry.
///
/// Cells fill left-to-right, top-to-bottom; each record gets exactly one
/// cell holding its upper-cased code, a QR square clamped to the padded cell
/// bounds, and a caption. Deterministic: same inputs, same plan.
pub fn plan_sheet(
    records: &[LabelRecord],
    geometry: &PageGeometry,
) -> Result<SheetPlan, LayoutError> {
    if records.is_empty() {
        return Err(LayoutError::NothingToRender);
    }

    let usable = geometry.cell_side - 2.0 * CELL_PADDING_PT;
    let code_size = TARGET_CODE_SIZE_PT
        .min(usable)
        .min(usable - LABEL_FONT_PT - CAPTION_FONT_PT - CODE_GAP_PT);

    let mut pages: Vec<PageBatch> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let placement = CellPlacement::for_index(index, geometry);
        while pages.len() <= placement.page {
            pages.push(PageBatch::default());
        }

        let (cell_x, cell_y) = placement.cell_origin(geometry);
        let x = cell_x + CELL_PADDING_PT;
        let y = cell_y + CELL_PADDING_PT;

        let code_y = y + LABEL_FONT_PT + CODE_GAP_PT;
        let ops = &mut pages[placement.page].ops;
        ops.push(DrawOp::Text {
            x,
            y,
            width: usable,
            font_size: LABEL_FONT_PT,
            text: record.code.to_uppercase(),
        });
        ops.push(DrawOp::Code {
            x: x + (usable - code_size) / 2.0,
            y: code_y,
            size: code_size,
            data: record.destination_url.clone(),
        });
        ops.push(DrawOp::Text {
            x,
            y: code_y + code_size,
            width: usable,
            font_size: CAPTION_FONT_PT,
            text: CAPTION_TEXT.to_string(),
        });
    }

    tracing::debug!(
        records = records.len(),
        pages = pages.len(),
        "planned label sheet"
    );

    Ok(SheetPlan {
        geometry: *geometry,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<LabelRecord> {
        (0..n)
            .map(|i| LabelRecord::new(format!("code{i:04}"), format!("https://x.test/t/{i}")))
            .collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        let g = PageGeometry::a4();
        assert!(matches!(
            plan_sheet(&[], &g),
            Err(LayoutError::NothingToRender)
        ));
    }

    #[test]
    fn single_record_fills_one_page() {
        let g = PageGeometry::a4();
        let plan = plan_sheet(&records(1), &g).unwrap();
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].ops.len(), 3);
    }

    #[test]
    fn page_count_is_ceil_of_records_over_capacity() {
        let g = PageGeometry::a4();
        for n in [1, 13, 266, 267, 532, 533] {
            let plan = plan_sheet(&records(n), &g).unwrap();
            assert_eq!(plan.pages.len(), n.div_ceil(g.cells_per_page), "n={n}");
        }
    }

    #[test]
    fn full_page_stays_on_one_page() {
        let g = PageGeometry::a4();
        let plan = plan_sheet(&records(g.cells_per_page), &g).unwrap();
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].ops.len(), g.cells_per_page * 3);
    }

    #[test]
    fn overflow_record_is_alone_on_next_page() {
        let g = PageGeometry::a4();
        let plan = plan_sheet(&records(g.cells_per_page + 1), &g).unwrap();
        assert_eq!(plan.pages.len(), 2);
        assert_eq!(plan.pages[1].ops.len(), 3);

        // The lone cell sits at row 0, column 0: its label starts at padding.
        let DrawOp::Text { x, y, .. } = &plan.pages[1].ops[0] else {
            panic!("expected label op first");
        };
        assert!((x - CELL_PADDING_PT).abs() < 1e-4);
        assert!((y - CELL_PADDING_PT).abs() < 1e-4);
    }

    #[test]
    fn label_text_is_upper_cased() {
        let g = PageGeometry::a4();
        let plan = plan_sheet(&[LabelRecord::new("ab12cd34", "https://x.test/t/a")], &g).unwrap();
        let DrawOp::Text { text, .. } = &plan.pages[0].ops[0] else {
            panic!("expected label op first");
        };
        assert_eq!(text, "AB12CD34");
    }

    #[test]
    fn code_box_fits_inside_padded_cell() {
        let g = PageGeometry::a4();
        let usable = g.cell_side - 2.0 * CELL_PADDING_PT;
        let plan = plan_sheet(&records(1), &g).unwrap();
        let DrawOp::Code { x, y, size, .. } = &plan.pages[0].ops[1] else {
            panic!("expected code op second");
        };
        assert!(*size <= usable);
        assert!(x + size <= CELL_PADDING_PT + usable + 1e-4);
        // Code plus caption never run past the cell bottom.
        assert!(y + size + CAPTION_FONT_PT <= g.cell_side + 1e-4);
    }

    #[test]
    fn caption_sits_beneath_the_code() {
        let g = PageGeometry::a4();
        let plan = plan_sheet(&records(1), &g).unwrap();
        let DrawOp::Code { y: code_y, size, .. } = &plan.pages[0].ops[1] else {
            panic!("expected code op second");
        };
        let DrawOp::Text { y: caption_y, text, .. } = &plan.pages[0].ops[2] else {
            panic!("expected caption op third");
        };
        assert_eq!(text, CAPTION_TEXT);
        assert!((caption_y - (code_y + size)).abs() < 1e-4);
    }

    #[test]
    fn planning_is_deterministic() {
        let g = PageGeometry::a4();
        let rs = records(300);
        assert_eq!(plan_sheet(&rs, &g).unwrap(), plan_sheet(&rs, &g).unwrap());
    }

    #[test]
    fn codes_encode_their_destination_url() {
        let g = PageGeometry::a4();
        let rs = records(2);
        let plan = plan_sheet(&rs, &g).unwrap();
        let DrawOp::Code { data, .. } = &plan.pages[0].ops[4] else {
            panic!("expected code op for second record");
        };
        assert_eq!(data, &rs[1].destination_url);
    }
}
