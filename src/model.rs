//! Data structures describing generation requests and the logical content of
//! the rendered document.
//!
//! The types in this module form a serialization-friendly model shared by the
//! prompt builder, the layout engine and the PDF serializer.  They
//! intentionally avoid referencing the rendering crate directly so the values
//! can be inspected and asserted on in tests without pulling in heavy
//! dependencies.

/// How much depth the completion endpoint is asked to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailLevel {
    /// Essential information only, brief bullet points.
    Concise,
    /// Key points, examples and a logical flow.
    #[default]
    Balanced,
    /// Comprehensive, multi-section coverage.
    Detailed,
}

impl DetailLevel {
    /// Parses a user-supplied selector, falling back to [`DetailLevel::Balanced`]
    /// for unrecognized values.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "concise" => Self::Concise,
            "detailed" => Self::Detailed,
            _ => Self::Balanced,
        }
    }
}

/// The writing style requested from the completion endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    /// Formal tone for business or technical documentation.
    Professional,
    /// Formal tone for educational materials.
    #[default]
    Academic,
    /// Very simple terms, analogies, no jargon.
    ExplainLikeFive,
    /// Engaging tone that makes the topic exciting.
    Enthusiastic,
}

impl Tone {
    /// Parses a user-supplied selector, falling back to [`Tone::Academic`]
    /// for unrecognized values.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "professional" => Self::Professional,
            "explainlike5" => Self::ExplainLikeFive,
            "enthusiastic" => Self::Enthusiastic,
            _ => Self::Academic,
        }
    }
}

/// The four independent formatting toggles offered to the user.
///
/// Each enabled toggle appends one instruction fragment to the prompt; all
/// toggles default to enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormattingOptions {
    highlight_points: bool,
    use_bullet_points: bool,
    add_examples: bool,
    add_summary: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            highlight_points: true,
            use_bullet_points: true,
            add_examples: true,
            add_summary: true,
        }
    }
}

impl FormattingOptions {
    /// Returns whether key points should be bolded.
    pub fn highlight_points(&self) -> bool {
        self.highlight_points
    }

    /// Returns whether bullet lists are requested.
    pub fn use_bullet_points(&self) -> bool {
        self.use_bullet_points
    }

    /// Returns whether practical examples are requested.
    pub fn add_examples(&self) -> bool {
        self.add_examples
    }

    /// Returns whether a closing summary is requested.
    pub fn add_summary(&self) -> bool {
        self.add_summary
    }

    /// Sets the highlight toggle and returns the updated options.
    pub fn with_highlight_points(mut self, enabled: bool) -> Self {
        self.highlight_points = enabled;
        self
    }

    /// Sets the bullet-list toggle and returns the updated options.
    pub fn with_bullet_points(mut self, enabled: bool) -> Self {
        self.use_bullet_points = enabled;
        self
    }

    /// Sets the examples toggle and returns the updated options.
    pub fn with_examples(mut self, enabled: bool) -> Self {
        self.add_examples = enabled;
        self
    }

    /// Sets the summary toggle and returns the updated options.
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.add_summary = enabled;
        self
    }
}

/// A single request sent to the completion endpoint, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    detail_level: DetailLevel,
    tone: Tone,
    formatting: FormattingOptions,
}

impl GenerationRequest {
    /// Creates a request for the given topic and selections.
    pub fn new(
        topic: impl Into<String>,
        detail_level: DetailLevel,
        tone: Tone,
        formatting: FormattingOptions,
    ) -> Self {
        Self {
            topic: topic.into(),
            detail_level,
            tone,
            formatting,
        }
    }

    /// Returns the topic this request covers.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the requested detail level.
    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }

    /// Returns the requested writing tone.
    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Returns the formatting toggles.
    pub fn formatting(&self) -> &FormattingOptions {
        &self.formatting
    }
}

/// A fetched question/answer pair awaiting layout.
///
/// `answer_markup` holds the raw completion text: plain lines mixed with the
/// constrained markup subset (`# `, `## `, `- `/`• ` prefixes) plus whatever
/// inline emphasis the model emitted despite instructions.  The sanitizer
/// strips the inline emphasis before layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QnaPair {
    question: String,
    answer_markup: String,
}

impl QnaPair {
    /// Creates a pair from a question and the raw answer text.
    pub fn new(question: impl Into<String>, answer_markup: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer_markup: answer_markup.into(),
        }
    }

    /// Returns the question as entered by the user.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the raw answer markup.
    pub fn answer_markup(&self) -> &str {
        &self.answer_markup
    }
}

/// Font weight of a positioned text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular body text.
    #[default]
    Normal,
    /// Bold headings and question titles.
    Bold,
}

/// A single positioned piece of text on a page.
///
/// Coordinates are millimetres with the origin at the *top-left* corner of
/// the page, matching the layout engine's downward-running cursor.  The PDF
/// serializer flips the y axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    text: String,
    x_mm: f64,
    y_mm: f64,
    size_pt: f64,
    weight: FontWeight,
    muted: bool,
}

impl TextRun {
    /// Creates a black text run at the given position.
    pub fn new(
        text: impl Into<String>,
        x_mm: f64,
        y_mm: f64,
        size_pt: f64,
        weight: FontWeight,
    ) -> Self {
        Self {
            text: text.into(),
            x_mm,
            y_mm,
            size_pt,
            weight,
            muted: false,
        }
    }

    /// Marks the run as muted (rendered grey, used for footers).
    pub fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Returns the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the horizontal position in millimetres from the left edge.
    pub fn x_mm(&self) -> f64 {
        self.x_mm
    }

    /// Returns the vertical position in millimetres from the top edge.
    pub fn y_mm(&self) -> f64 {
        self.y_mm
    }

    /// Returns the font size in points.
    pub fn size_pt(&self) -> f64 {
        self.size_pt
    }

    /// Returns the font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Returns whether the run is rendered in the muted footer colour.
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

/// An ordered sequence of positioned text runs on one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    runs: Vec<TextRun>,
}

impl Page {
    /// Returns the runs on this page in emission order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Appends a run to the page.
    pub fn push_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }
}

/// The fully laid-out document: an ordered sequence of pages, built once by
/// the layout engine and immutable afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Creates a document from already laid-out pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Returns the pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_level_parse_falls_back_to_balanced() {
        assert_eq!(DetailLevel::parse("concise"), DetailLevel::Concise);
        assert_eq!(DetailLevel::parse("Detailed"), DetailLevel::Detailed);
        assert_eq!(DetailLevel::parse("thorough"), DetailLevel::Balanced);
        assert_eq!(DetailLevel::parse(""), DetailLevel::Balanced);
    }

    #[test]
    fn tone_parse_falls_back_to_academic() {
        assert_eq!(Tone::parse("professional"), Tone::Professional);
        assert_eq!(Tone::parse("ExplainLike5"), Tone::ExplainLikeFive);
        assert_eq!(Tone::parse("enthusiastic"), Tone::Enthusiastic);
        assert_eq!(Tone::parse("casual"), Tone::Academic);
    }

    #[test]
    fn formatting_options_default_to_all_enabled() {
        let options = FormattingOptions::default();
        assert!(options.highlight_points());
        assert!(options.use_bullet_points());
        assert!(options.add_examples());
        assert!(options.add_summary());
    }

    #[test]
    fn formatting_options_toggle_independently() {
        let options = FormattingOptions::default()
            .with_bullet_points(false)
            .with_summary(false);
        assert!(options.highlight_points());
        assert!(!options.use_bullet_points());
        assert!(options.add_examples());
        assert!(!options.add_summary());
    }
}
