//! Serializes a laid-out [`Document`] into PDF bytes.
//!
//! The layout engine works in top-left-origin millimetres, while PDF places
//! its origin at the bottom-left corner; this module flips the y axis and
//! writes each [`TextRun`] with one of the two built-in Helvetica faces, so
//! no font assets need to ship with the crate.

use std::io::BufWriter;

use log::debug;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rgb};

use crate::error::{NotegenError, Result};
use crate::layout::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::model::{Document, FontWeight};

/// Footer grey, matching rgb(100, 100, 100) on a 0..255 scale.
const MUTED_GREY: f64 = 100.0 / 255.0;

/// Renders the document into a finished PDF byte buffer.
///
/// `title` becomes the PDF document title in its metadata.
pub fn to_pdf_bytes(document: &Document, title: &str) -> Result<Vec<u8>> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| NotegenError::Render(e.to_string()))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| NotegenError::Render(e.to_string()))?;

    for (index, page) in document.pages().iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            let (page_index, layer_index) =
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            (page_index, layer_index)
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);

        for run in page.runs() {
            let color = if run.is_muted() {
                Color::Rgb(Rgb::new(MUTED_GREY, MUTED_GREY, MUTED_GREY, None))
            } else {
                Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
            };
            layer.set_fill_color(color);

            let font: &IndirectFontRef = match run.weight() {
                FontWeight::Bold => &bold,
                FontWeight::Normal => &regular,
            };
            layer.use_text(
                run.text(),
                run.size_pt(),
                Mm(run.x_mm()),
                Mm(PAGE_HEIGHT_MM - run.y_mm()),
                font,
            );
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    pdf.save(&mut writer)
        .map_err(|e| NotegenError::Render(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| NotegenError::Render(e.to_string()))?;

    debug!("serialized {} page(s), {} bytes", document.page_count(), bytes.len());
    Ok(bytes)
}
