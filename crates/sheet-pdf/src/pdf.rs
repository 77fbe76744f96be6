//! PDF encoding of a planned sheet via `pdf-writer`.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use code_image::CodeEncoder;
use sheet_layout::{DrawOp, SheetPlan};

use crate::{CODE_RASTER_PX, DocumentSink, RenderError};

const FONT_NAME: &[u8] = b"F1";

/// Fraction of the font size between a line's top edge and its baseline.
const ASCENT_RATIO: f32 = 0.75;

/// Renders a `SheetPlan` into a single PDF byte buffer.
///
/// One PDF page per batch. Text uses the built-in Helvetica font; each code
/// raster becomes a Flate-compressed DeviceGray image XObject placed by a
/// `cm` transform. The layout's y-down coordinates are flipped into PDF's
/// bottom-left origin here.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfSink;

impl DocumentSink for PdfSink {
    fn render(&self, plan: &SheetPlan, encoder: &dyn CodeEncoder) -> Result<Vec<u8>, RenderError> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let font_id = alloc.bump();

        let mut pdf = Pdf::new();
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        let page_w = plan.geometry.page_width;
        let page_h = plan.geometry.page_height;

        let mut page_ids = Vec::with_capacity(plan.pages.len());
        for batch in &plan.pages {
            let page_id = alloc.bump();
            let content_id = alloc.bump();

            let mut content = Content::new();
            let mut images: Vec<(String, Ref)> = Vec::new();

            for op in &batch.ops {
                match op {
                    DrawOp::Text {
                        x,
                        y,
                        width,
                        font_size,
                        text,
                    } => {
                        let text_w = crate::metrics::text_width(text, *font_size);
                        let text_x = x + ((width - text_w) / 2.0).max(0.0);
                        let baseline = page_h - (y + font_size * ASCENT_RATIO);

                        content.begin_text();
                        content.set_font(Name(FONT_NAME), *font_size);
                        content.next_line(text_x, baseline);
                        content.show(Str(text.as_bytes()));
                        content.end_text();
                    }
                    DrawOp::Code { x, y, size, data } => {
                        let raster = encoder.encode(data, CODE_RASTER_PX)?;

                        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
                        enc.write_all(&raster.pixels)?;
                        let compressed = enc.finish()?;

                        let image_id = alloc.bump();
                        let mut xobject = pdf.image_xobject(image_id, &compressed);
                        xobject.filter(Filter::FlateDecode);
                        xobject.width(raster.width as i32);
                        xobject.height(raster.width as i32);
                        xobject.color_space().device_gray();
                        xobject.bits_per_component(8);
                        // Keep modules crisp when the viewer scales down.
                        xobject.interpolate(false);
                        drop(xobject);

                        let name = format!("Im{}", images.len());
                        content.save_state();
                        content.transform([*size, 0.0, 0.0, *size, *x, page_h - y - size]);
                        content.x_object(Name(name.as_bytes()));
                        content.restore_state();
                        images.push((name, image_id));
                    }
                }
            }

            pdf.stream(content_id, &content.finish());

            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
            page.parent(page_tree_id);
            page.contents(content_id);
            let mut resources = page.resources();
            resources.fonts().pair(Name(FONT_NAME), font_id);
            if !images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, id) in &images {
                    xobjects.pair(Name(name.as_bytes()), *id);
                }
            }
            drop(resources);
            drop(page);

            page_ids.push(page_id);
        }

        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        pdf.catalog(catalog_id).pages(page_tree_id);

        let bytes = pdf.finish();
        tracing::debug!(
            pages = plan.pages.len(),
            bytes = bytes.len(),
            "rendered label sheet PDF"
        );
        Ok(bytes)
    }
}
