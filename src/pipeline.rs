//! End-to-end generation: topics in, PDF file out.
//!
//! The [`Generator`] walks the topic list strictly in order, fetching one
//! answer per topic through the injected [`CompletionBackend`], then lays the
//! collected pairs out and writes the finished PDF.  Any fetch error aborts
//! the run and discards the answers gathered so far; nothing is written.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::info;

use crate::client::CompletionBackend;
use crate::error::{NotegenError, Result};
use crate::layout;
use crate::model::{DetailLevel, FormattingOptions, GenerationRequest, QnaPair, Tone};
use crate::prompt::build_prompt;
use crate::render;

/// Output filename used when the caller leaves the name blank.
pub const DEFAULT_FILENAME: &str = "ai-notes.pdf";

/// Pause between consecutive endpoint requests.
const REQUEST_PAUSE: Duration = Duration::from_millis(500);

/// Longest topic excerpt shown in a progress status line.
const STATUS_LABEL_MAX: usize = 50;

/// A progress snapshot reported once per topic plus once before PDF assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    /// 1-based index of the topic being fetched; equals `total` during assembly.
    pub current: usize,
    /// Total number of topics in the run.
    pub total: usize,
    /// Percentage of topics already completed, 0..100.
    pub percent: u8,
    /// Human-readable status line.
    pub status: String,
}

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Path the PDF was written to.
    pub path: PathBuf,
    /// Number of pages in the document, title page included.
    pub pages: usize,
    /// Size of the written file in bytes.
    pub bytes_written: usize,
}

/// Drives the fetch/layout/write sequence for one batch of topics.
pub struct Generator<B> {
    backend: B,
    pause: Duration,
    generated_on: Option<String>,
}

impl<B: CompletionBackend> Generator<B> {
    /// Creates a generator with the default inter-request pause.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pause: REQUEST_PAUSE,
            generated_on: None,
        }
    }

    /// Overrides the pause between requests; tests pass [`Duration::ZERO`].
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Pins the title-page date instead of using today's.
    pub fn with_generated_on(mut self, date: impl Into<String>) -> Self {
        self.generated_on = Some(date.into());
        self
    }

    /// Runs the whole pipeline and writes the PDF next to `filename`.
    ///
    /// `topics_text` is split on newlines; blank lines are ignored.
    /// `on_progress` fires before each fetch and once before PDF assembly.
    pub fn run<F>(
        &self,
        topics_text: &str,
        filename: &str,
        detail_level: DetailLevel,
        tone: Tone,
        formatting: FormattingOptions,
        mut on_progress: F,
    ) -> Result<GenerationOutcome>
    where
        F: FnMut(&Progress),
    {
        let topics = parse_topics(topics_text);
        if topics.is_empty() {
            return Err(NotegenError::EmptyTopics);
        }
        let path = PathBuf::from(normalize_filename(filename));
        let total = topics.len();

        let mut pairs = Vec::with_capacity(total);
        for (index, topic) in topics.iter().enumerate() {
            on_progress(&Progress {
                current: index + 1,
                total,
                percent: (index * 100 / total) as u8,
                status: format!("Processing: {}", truncate_label(topic)),
            });

            let request = GenerationRequest::new(topic.clone(), detail_level, tone, formatting);
            let answer = self.backend.complete(&build_prompt(&request))?;
            pairs.push(QnaPair::new(topic.clone(), answer));

            if !self.pause.is_zero() {
                thread::sleep(self.pause);
            }
        }

        on_progress(&Progress {
            current: total,
            total,
            percent: 100,
            status: "Creating PDF document...".to_string(),
        });

        let generated_on = match &self.generated_on {
            Some(date) => date.clone(),
            None => chrono::Local::now().format("%Y-%m-%d").to_string(),
        };
        let document = layout::render(&pairs, &generated_on);
        let bytes = render::to_pdf_bytes(&document, "AI-Generated Study Notes")?;
        write_pdf(&path, &bytes)?;

        info!(
            "wrote {} ({} pages, {} bytes)",
            path.display(),
            document.page_count(),
            bytes.len()
        );
        Ok(GenerationOutcome {
            path,
            pages: document.page_count(),
            bytes_written: bytes.len(),
        })
    }
}

fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Splits the raw topics text into trimmed, non-empty lines.
fn parse_topics(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims the name, falls back to [`DEFAULT_FILENAME`] when blank, and appends
/// `.pdf` unless the name already ends with it (case-insensitively).
fn normalize_filename(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    if trimmed.to_ascii_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}

/// Shortens a topic to at most [`STATUS_LABEL_MAX`] characters for display.
fn truncate_label(topic: &str) -> String {
    if topic.chars().count() > STATUS_LABEL_MAX {
        let prefix: String = topic.chars().take(STATUS_LABEL_MAX).collect();
        format!("{prefix}...")
    } else {
        topic.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CannedBackend {
        answers: RefCell<Vec<Result<String>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl CannedBackend {
        fn new(answers: Vec<Result<String>>) -> Self {
            Self {
                answers: RefCell::new(answers),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionBackend for CannedBackend {
        fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answers.borrow_mut().remove(0)
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn empty_topics_is_rejected_before_any_request() {
        let backend = CannedBackend::new(vec![]);
        let generator = Generator::new(backend).with_pause(Duration::ZERO);
        let err = generator
            .run(
                "  \n\n   \n",
                "x.pdf",
                DetailLevel::default(),
                Tone::default(),
                FormattingOptions::default(),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, NotegenError::EmptyTopics));
    }

    #[test]
    fn topics_are_fetched_in_order_with_progress() {
        let backend = CannedBackend::new(vec![
            Ok("Answer one.".to_string()),
            Ok("Answer two.".to_string()),
        ]);
        let generator = Generator::new(backend)
            .with_pause(Duration::ZERO)
            .with_generated_on("2024-05-01");

        let path = temp_path("notegen-order-test.pdf");
        let mut seen = Vec::new();
        let outcome = generator
            .run(
                "Entropy\n\n  Enthalpy  \n",
                path.to_str().unwrap(),
                DetailLevel::Concise,
                Tone::Professional,
                FormattingOptions::default(),
                |progress| seen.push(progress.clone()),
            )
            .unwrap();

        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.path, path);
        assert_eq!(
            std::fs::metadata(&path).unwrap().len() as usize,
            outcome.bytes_written
        );
        std::fs::remove_file(&path).unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].status, "Processing: Entropy");
        assert_eq!(seen[0].percent, 0);
        assert_eq!(seen[1].status, "Processing: Enthalpy");
        assert_eq!(seen[1].percent, 50);
        assert_eq!(seen[2].status, "Creating PDF document...");
        assert_eq!(seen[2].percent, 100);
    }

    #[test]
    fn backend_failure_aborts_and_writes_nothing() {
        let backend = CannedBackend::new(vec![
            Ok("fine".to_string()),
            Err(NotegenError::Api {
                status: 500,
                message: "API error: 500".to_string(),
            }),
        ]);
        let generator = Generator::new(backend).with_pause(Duration::ZERO);

        let path = temp_path("notegen-abort-test.pdf");
        let _ = std::fs::remove_file(&path);
        let err = generator
            .run(
                "one\ntwo\nthree\n",
                path.to_str().unwrap(),
                DetailLevel::default(),
                Tone::default(),
                FormattingOptions::default(),
                |_| {},
            )
            .unwrap_err();

        assert!(err.to_string().contains("API error: 500"));
        assert!(!path.exists());
    }

    #[test]
    fn long_topics_are_truncated_in_status_lines() {
        let topic = "t".repeat(60);
        let label = truncate_label(&topic);
        assert_eq!(label.chars().count(), STATUS_LABEL_MAX + 3);
        assert!(label.ends_with("..."));
        assert_eq!(truncate_label("short"), "short");
    }

    #[test]
    fn filenames_are_normalized() {
        assert_eq!(normalize_filename("notes"), "notes.pdf");
        assert_eq!(normalize_filename("notes.PDF"), "notes.PDF");
        assert_eq!(normalize_filename("  notes.pdf  "), "notes.pdf");
        assert_eq!(normalize_filename("   "), DEFAULT_FILENAME);
        assert_eq!(normalize_filename(""), DEFAULT_FILENAME);
    }

    #[test]
    fn parse_topics_drops_blank_lines() {
        assert_eq!(
            parse_topics(" a \n\n b\r\nc"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
