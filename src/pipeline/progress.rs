// file: src/pipeline/progress.rs
// description: progress bar and outcome counters for batch paper ingestion
// reference: https://docs.rs/indicatif

use crate::error::Result;
use crate::models::Paper;
use crate::pipeline::scanner::ScannedFile;
use crate::utils::logging::{format_error, format_success, format_warning};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// How a single file fared during batch ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Ingested,
    /// The file itself was unusable: wrong name, empty, or not a readable PDF.
    Rejected,
    /// The file was fine but storing it failed.
    Failed,
}

impl IngestOutcome {
    pub fn classify(result: &Result<Paper>) -> Self {
        match result {
            Ok(_) => IngestOutcome::Ingested,
            Err(e) if e.is_client_error() => IngestOutcome::Rejected,
            Err(_) => IngestOutcome::Failed,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub ingested: usize,
    pub rejected: usize,
    pub failed: usize,
    pub pages_extracted: u64,
    pub bytes_ingested: u64,
    pub elapsed: Duration,
}

impl PipelineStats {
    pub fn attempted(&self) -> usize {
        self.ingested + self.rejected + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        match self.attempted() {
            0 => 0.0,
            total => self.ingested as f64 / total as f64 * 100.0,
        }
    }

    pub fn papers_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.ingested as f64 / secs
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Ingested {} papers ({} pages), {} rejected, {} failed ({:.1}% success)",
            self.ingested,
            self.pages_extracted,
            self.rejected,
            self.failed,
            self.success_rate()
        )
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    ingested: AtomicUsize,
    rejected: AtomicUsize,
    failed: AtomicUsize,
    pages: AtomicU64,
    bytes: AtomicU64,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {wide_msg}"
        };

        let bar = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            bar,
            ingested: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            pages: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Announces the file a worker is about to ingest.
    pub fn start(&self, file: &ScannedFile) {
        self.bar.set_message(file.relative_path.clone());
    }

    /// Counts the result for `file` and prints one status line above the bar.
    pub fn record(&self, file: &ScannedFile, result: &Result<Paper>) -> IngestOutcome {
        let outcome = IngestOutcome::classify(result);

        let line = match result {
            Ok(paper) => {
                self.ingested.fetch_add(1, Ordering::SeqCst);
                self.pages.fetch_add(u64::from(paper.page_count), Ordering::SeqCst);
                self.bytes.fetch_add(file.size, Ordering::SeqCst);
                format_success(&format!(
                    "[{}] {} ({})",
                    paper.id, paper.title, file.relative_path
                ))
            }
            Err(e) if outcome == IngestOutcome::Rejected => {
                self.rejected.fetch_add(1, Ordering::SeqCst);
                format_warning(&format!("{}: {}", file.relative_path, e))
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                format_error(&format!("{}: {}", file.relative_path, e))
            }
        };

        self.bar.println(line);
        self.bar.inc(1);
        outcome
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_with_message("done");
        }
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            ingested: self.ingested.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            pages_extracted: self.pages.load(Ordering::SeqCst),
            bytes_ingested: self.bytes.load(Ordering::SeqCst),
            elapsed: self.start_time.elapsed(),
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaperError;
    use std::path::PathBuf;

    fn scanned(name: &str) -> ScannedFile {
        ScannedFile {
            path: PathBuf::from(name),
            relative_path: name.to_string(),
            size: 2048,
        }
    }

    fn paper(id: i64, page_count: u32) -> Paper {
        Paper {
            id,
            title: "Title".to_string(),
            authors: "Author".to_string(),
            abstract_text: String::new(),
            content: "Body".to_string(),
            filename: "a.pdf".to_string(),
            stored_path: "uploads/a.pdf".to_string(),
            content_hash: String::new(),
            page_count,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_classify_outcomes() {
        assert_eq!(
            IngestOutcome::classify(&Ok(paper(1, 1))),
            IngestOutcome::Ingested
        );
        assert_eq!(
            IngestOutcome::classify(&Err(PaperError::Pdf("bad xref".to_string()))),
            IngestOutcome::Rejected
        );
        assert_eq!(
            IngestOutcome::classify(&Err(PaperError::Llm("unused".to_string()))),
            IngestOutcome::Failed
        );
    }

    #[test]
    fn test_record_updates_counters() {
        let tracker = ProgressTracker::with_color(3, false);

        tracker.record(&scanned("a.pdf"), &Ok(paper(1, 4)));
        tracker.record(
            &scanned("b.pdf"),
            &Err(PaperError::Validation("Uploaded file is empty".to_string())),
        );
        tracker.record(
            &scanned("c.pdf"),
            &Err(PaperError::Serialization("disk".to_string())),
        );

        let stats = tracker.stats();
        assert_eq!(stats.ingested, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.pages_extracted, 4);
        assert_eq!(stats.bytes_ingested, 2048);
        assert_eq!(stats.attempted(), 3);
    }

    #[test]
    fn test_stats_rates() {
        let stats = PipelineStats {
            ingested: 9,
            rejected: 1,
            elapsed: Duration::from_secs(3),
            ..PipelineStats::default()
        };

        assert!((stats.success_rate() - 90.0).abs() < f64::EPSILON);
        assert!((stats.papers_per_second() - 3.0).abs() < f64::EPSILON);
        assert!(stats.summary_line().contains("1 rejected"));

        let empty = PipelineStats::default();
        assert_eq!(empty.success_rate(), 0.0);
        assert_eq!(empty.papers_per_second(), 0.0);
    }
}
