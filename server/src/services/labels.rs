//! Label sheet generation.
//!
//! Pulls unprinted tags from the store, plans the sheet, renders the PDF,
//! and records the print job. All-or-nothing: tags are marked printed only
//! after the document fully materialized, and any failure yields no
//! document at all.

use code_image::QrEncoder;
use sheet_layout::{LabelRecord, LayoutError, PageGeometry, plan_sheet};
use sheet_pdf::{DocumentSink, PdfSink, RenderError};
use tag_db::{Database, DbError};
use uuid::Uuid;

/// A finished sheet job: the document plus its bookkeeping.
pub struct SheetOutcome {
    pub job_id: String,
    pub filename: String,
    pub tag_count: usize,
    pub pages: usize,
    pub pdf: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("no labels to print")]
    NoLabels,

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Generate a label sheet for up to `max_labels` unprinted, unassigned tags.
pub fn generate_sheet(
    db: &Database,
    public_base_url: &str,
    max_labels: usize,
) -> Result<SheetOutcome, SheetError> {
    let tags = db.unprinted_tags(max_labels)?;
    if tags.is_empty() {
        return Err(SheetError::NoLabels);
    }

    let records: Vec<LabelRecord> = tags
        .iter()
        .map(|t| {
            LabelRecord::new(
                t.code.as_str(),
                format!("{public_base_url}/t/{}", t.code),
            )
        })
        .collect();

    let plan = plan_sheet(&records, &PageGeometry::a4())?;
    let pdf = PdfSink.render(&plan, &QrEncoder)?;

    let job_id = Uuid::new_v4().to_string();
    let codes: Vec<String> = tags.into_iter().map(|t| t.code).collect();
    db.mark_printed(&codes, &job_id)?;

    tracing::info!(
        job_id = %job_id,
        tags = codes.len(),
        pages = plan.pages.len(),
        bytes = pdf.len(),
        "generated label sheet"
    );

    let stamp = chrono::Utc::now().format("%Y%m%d");
    Ok(SheetOutcome {
        filename: format!("tag-labels-{stamp}-{}.pdf", &job_id[..8]),
        job_id,
        tag_count: codes.len(),
        pages: plan.pages.len(),
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test DB")
    }

    const BASE: &str = "https://tags.example.com";

    #[test]
    fn empty_store_yields_no_labels() {
        let db = test_db();
        assert!(matches!(
            generate_sheet(&db, BASE, 100),
            Err(SheetError::NoLabels)
        ));
    }

    #[test]
    fn sheet_covers_all_unprinted_tags_and_marks_them() {
        let db = test_db();
        db.mint_tags(10).unwrap();

        let outcome = generate_sheet(&db, BASE, 100).unwrap();
        assert_eq!(outcome.tag_count, 10);
        assert_eq!(outcome.pages, 1);
        assert!(outcome.pdf.starts_with(b"%PDF-"));
        assert!(outcome.filename.ends_with(".pdf"));

        // Everything printed; a second run has nothing left.
        assert!(db.unprinted_tags(100).unwrap().is_empty());
        assert!(matches!(
            generate_sheet(&db, BASE, 100),
            Err(SheetError::NoLabels)
        ));

        let jobs = db.print_jobs().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].tag_count, 10);
    }

    #[test]
    fn request_cap_limits_the_sheet() {
        let db = test_db();
        db.mint_tags(20).unwrap();

        let outcome = generate_sheet(&db, BASE, 5).unwrap();
        assert_eq!(outcome.tag_count, 5);
        assert_eq!(db.unprinted_tags(100).unwrap().len(), 15);
    }

    #[test]
    fn multi_page_jobs_roll_over() {
        let db = test_db();
        db.mint_tags(267).unwrap();

        let outcome = generate_sheet(&db, BASE, 2000).unwrap();
        assert_eq!(outcome.tag_count, 267);
        assert_eq!(outcome.pages, 2);
    }
}
