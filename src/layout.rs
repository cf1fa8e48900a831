//! Pagination and text layout for the notes document.
//!
//! The engine walks the ordered question/answer list with a downward-running
//! cursor, emitting positioned [`TextRun`]s onto A4 pages.  Pagination is
//! checked at two granularities through a single [`LayoutCursor::ensure_space`]
//! operation: a coarse limit before each question block and a finer limit
//! before every rendered answer block.  Once all pairs are laid out, an
//! identical footer with the final page total is stamped onto every page,
//! title page included.

use log::debug;

use crate::model::{Document, FontWeight, Page, QnaPair, TextRun};
use crate::sanitize::sanitize;

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Left/right page margin in millimetres.
pub const MARGIN_MM: f64 = 20.0;
/// Cursor position at the top of a fresh page.
pub const TOP_MARGIN_MM: f64 = 20.0;

/// Coarse bottom limit checked before each question block.
const PAIR_BREAK_LIMIT_MM: f64 = 250.0;
/// Fine bottom limit checked before every rendered answer block.
const LINE_BREAK_LIMIT_MM: f64 = 270.0;
/// Vertical position of the page footer.
const FOOTER_Y_MM: f64 = 290.0;

const TITLE_SIZE_PT: f64 = 22.0;
const SUBTITLE_SIZE_PT: f64 = 16.0;
const H1_SIZE_PT: f64 = 16.0;
const H2_SIZE_PT: f64 = 14.0;
const QUESTION_SIZE_PT: f64 = 14.0;
const BODY_SIZE_PT: f64 = 12.0;
const FOOTER_SIZE_PT: f64 = 10.0;

const BODY_LINE_HEIGHT_MM: f64 = 7.0;
const QUESTION_LINE_HEIGHT_MM: f64 = 6.0;
const QUESTION_SPACING_MM: f64 = 5.0;
const BLANK_LINE_GAP_MM: f64 = 5.0;
const H1_ADVANCE_MM: f64 = 10.0;
const H2_ADVANCE_MM: f64 = 8.0;
const LINE_GAP_MM: f64 = 2.0;
const PAIR_TRAILING_GAP_MM: f64 = 15.0;
const BULLET_INDENT_MM: f64 = 5.0;

/// Average glyph width as a fraction of the font size, tuned for Helvetica.
const CHAR_WIDTH_FACTOR: f64 = 0.5;
const PT_TO_MM: f64 = 0.352_778;

const DOCUMENT_TITLE: &str = "AI-Generated Study Notes";
const FOOTER_ATTRIBUTION: &str = "Generated by AI Notes Generator";

/// Approximates the rendered width of `text` at `size_pt` in millimetres.
///
/// Built-in Type1 fonts expose no glyph metrics, so both wrapping and
/// centring use this average-width routine; what matters is that every
/// layout decision measures through the same function.
pub(crate) fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * CHAR_WIDTH_FACTOR * PT_TO_MM
}

/// Maximum characters that fit into `width_mm` at `size_pt`.
fn max_chars_for_width(width_mm: f64, size_pt: f64) -> usize {
    let per_char = size_pt * CHAR_WIDTH_FACTOR * PT_TO_MM;
    ((width_mm / per_char) as usize).max(10)
}

/// Greedy whitespace word-wrap against a character budget per line.
///
/// Always yields at least one (possibly empty) line so callers can advance
/// the cursor by `lines.len()` unconditionally.
fn word_wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// The running layout state: the page list plus the vertical cursor.
struct LayoutCursor {
    pages: Vec<Page>,
    y: f64,
}

impl LayoutCursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP_MARGIN_MM,
        }
    }

    /// Starts a new page and resets the cursor to the top margin.
    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP_MARGIN_MM;
    }

    /// Breaks the page when the cursor has crossed `limit`.
    ///
    /// Used with [`PAIR_BREAK_LIMIT_MM`] before each question and with
    /// [`LINE_BREAK_LIMIT_MM`] before each rendered answer block; both reset
    /// the cursor to the same top margin.
    fn ensure_space(&mut self, limit: f64) {
        if self.y > limit {
            self.new_page();
        }
    }

    fn emit(&mut self, run: TextRun) {
        // pages is never empty (see `new`/`new_page`).
        if let Some(page) = self.pages.last_mut() {
            page.push_run(run);
        }
    }

    /// Emits a block of wrapped lines at `x_mm` and advances the cursor by
    /// `line_height_mm` per line.
    fn emit_wrapped(
        &mut self,
        lines: &[String],
        x_mm: f64,
        size_pt: f64,
        weight: FontWeight,
        line_height_mm: f64,
    ) {
        for (index, line) in lines.iter().enumerate() {
            self.emit(TextRun::new(
                line.clone(),
                x_mm,
                self.y + index as f64 * line_height_mm,
                size_pt,
                weight,
            ));
        }
        self.y += lines.len() as f64 * line_height_mm;
    }

    /// Emits a horizontally centred single run at the cursor-independent `y_mm`.
    fn emit_centered(&mut self, text: &str, y_mm: f64, size_pt: f64, weight: FontWeight) {
        let x_mm = (PAGE_WIDTH_MM - text_width_mm(text, size_pt)) / 2.0;
        self.emit(TextRun::new(text, x_mm, y_mm, size_pt, weight));
    }
}

/// Lays out the ordered question/answer list into a paginated [`Document`].
///
/// `generated_on` is the human-readable date shown on the title page; the
/// pipeline passes the current date and tests inject a fixed one.
pub fn render(qna_list: &[QnaPair], generated_on: &str) -> Document {
    let mut cursor = LayoutCursor::new();
    let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

    // Title page, then content starts on a fresh page.
    cursor.emit_centered(DOCUMENT_TITLE, 100.0, TITLE_SIZE_PT, FontWeight::Bold);
    cursor.emit_centered(
        &format!("Generated on {generated_on}"),
        120.0,
        SUBTITLE_SIZE_PT,
        FontWeight::Normal,
    );
    cursor.new_page();

    for pair in qna_list {
        cursor.ensure_space(PAIR_BREAK_LIMIT_MM);

        let question_lines = word_wrap(
            pair.question(),
            max_chars_for_width(usable_width, QUESTION_SIZE_PT),
        );
        cursor.emit_wrapped(
            &question_lines,
            MARGIN_MM,
            QUESTION_SIZE_PT,
            FontWeight::Bold,
            QUESTION_LINE_HEIGHT_MM,
        );
        cursor.y += QUESTION_SPACING_MM;

        let clean = sanitize(pair.answer_markup());
        for line in clean.lines() {
            if line.trim().is_empty() {
                cursor.y += BLANK_LINE_GAP_MM;
                continue;
            }

            cursor.ensure_space(LINE_BREAK_LIMIT_MM);

            if let Some(rest) = line.strip_prefix("# ") {
                cursor.emit(TextRun::new(
                    rest.trim(),
                    MARGIN_MM,
                    cursor.y,
                    H1_SIZE_PT,
                    FontWeight::Bold,
                ));
                cursor.y += H1_ADVANCE_MM;
            } else if let Some(rest) = line.strip_prefix("## ") {
                cursor.emit(TextRun::new(
                    rest.trim(),
                    MARGIN_MM,
                    cursor.y,
                    H2_SIZE_PT,
                    FontWeight::Bold,
                ));
                cursor.y += H2_ADVANCE_MM;
            } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("• ")) {
                let lines = word_wrap(
                    rest.trim(),
                    max_chars_for_width(usable_width - 2.0 * BULLET_INDENT_MM, BODY_SIZE_PT),
                );
                cursor.emit_wrapped(
                    &lines,
                    MARGIN_MM + BULLET_INDENT_MM,
                    BODY_SIZE_PT,
                    FontWeight::Normal,
                    BODY_LINE_HEIGHT_MM,
                );
            } else {
                let lines = word_wrap(line, max_chars_for_width(usable_width, BODY_SIZE_PT));
                cursor.emit_wrapped(
                    &lines,
                    MARGIN_MM,
                    BODY_SIZE_PT,
                    FontWeight::Normal,
                    BODY_LINE_HEIGHT_MM,
                );
            }

            cursor.y += LINE_GAP_MM;
        }

        cursor.y += PAIR_TRAILING_GAP_MM;
    }

    // Footer pass: the total is only known once layout is complete.
    let total = cursor.pages.len();
    for (index, page) in cursor.pages.iter_mut().enumerate() {
        let text = format!(
            "Page {} of {} \u{2022} {}",
            index + 1,
            total,
            FOOTER_ATTRIBUTION
        );
        let x_mm = (PAGE_WIDTH_MM - text_width_mm(&text, FOOTER_SIZE_PT)) / 2.0;
        page.push_run(
            TextRun::new(text, x_mm, FOOTER_Y_MM, FOOTER_SIZE_PT, FontWeight::Normal).muted(),
        );
    }

    debug!(
        "laid out {} pairs across {} pages",
        qna_list.len(),
        cursor.pages.len()
    );

    Document::new(cursor.pages)
}
