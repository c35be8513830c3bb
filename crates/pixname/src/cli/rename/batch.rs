//! Batch renaming: one file at a time, with a spinner per API call and a
//! summary at the end.

use pixname_core::{ImageFile, Renamer, SuggestResult};
use std::time::{Duration, Instant};

use crate::cli::interactive::theme::Palette;
use crate::cli::progress::ProgressIndicator;

/// Counts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub total: usize,
    pub renamed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Rename every file in order. A failure on one file never stops the batch,
/// and nothing already renamed is rolled back.
pub(crate) async fn rename_batch(
    renamer: &Renamer,
    files: &[ImageFile],
    palette: &Palette,
    show_progress: bool,
) -> BatchSummary {
    let total = files.len();
    let start_time = Instant::now();
    let mut renamed = 0usize;
    let mut failed = 0usize;

    eprintln!("Analyzing {total} images...");

    for (idx, file) in files.iter().enumerate() {
        eprintln!();
        eprintln!(
            "{} {}",
            palette.muted.apply_to(format!("[{}/{}]", idx + 1, total)),
            palette.strong.apply_to(file.display_name())
        );

        let indicator = if show_progress {
            ProgressIndicator::start("Analyzing")
        } else {
            ProgressIndicator::hidden("Analyzing")
        };

        let outcome = match renamer.suggest(file).await {
            SuggestResult::Success(suggestion) => {
                tracing::debug!(
                    "{:?}: {:?} from {} after {} attempt(s), {}ms",
                    file.path,
                    suggestion.text,
                    suggestion.model,
                    suggestion.attempts,
                    suggestion.latency_ms
                );
                renamer
                    .apply(file, &suggestion.text)
                    .map_err(|e| e.to_string())
            }
            SuggestResult::Failure { message, attempts } => {
                tracing::debug!("{:?}: failed after {attempts} attempt(s)", file.path);
                Err(message)
            }
        };

        match outcome {
            Ok(target) => {
                indicator.stop(true, None);
                let new_name = target
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| target.display().to_string());
                eprintln!("    Renamed to: {new_name}");
                renamed += 1;
            }
            Err(reason) => {
                indicator.stop(false, Some(&reason));
                tracing::debug!("Skipped {:?}: {reason}", file.path);
                failed += 1;
            }
        }
    }

    BatchSummary {
        total,
        renamed,
        failed,
        elapsed: start_time.elapsed(),
    }
}

/// Print the final count and a short summary.
pub(crate) fn print_summary(summary: &BatchSummary, palette: &Palette) {
    eprintln!();
    eprintln!(
        "{}",
        palette.success.apply_to(format!(
            "Success! Renamed {} of {} images.",
            summary.renamed, summary.total
        ))
    );
    eprintln!("  ------------------------------------");
    eprintln!("    Renamed:      {:>8}", summary.renamed);
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("    Duration:     {:>7.1}s", summary.elapsed.as_secs_f64());
    eprintln!("  ------------------------------------");

    tracing::info!(
        "Renamed {} of {} images ({} failed) in {:.1}s",
        summary.renamed,
        summary.total,
        summary.failed,
        summary.elapsed.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pixname_core::llm::{ImageInput, LlmResponse, NameRequest};
    use pixname_core::{
        FileDiscovery, NamingOptions, PipelineError, RetryOptions, Suggester, VisionProvider,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// Answers per image payload; payloads without an answer always fail.
    struct MockProvider {
        answers: HashMap<String, String>,
        call_count: Arc<AtomicU32>,
    }

    impl MockProvider {
        /// `answers` maps file contents to the suggestion for that file.
        fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(contents, text)| (payload(contents.as_bytes()), text.to_string()))
                    .collect(),
                call_count: Arc::new(AtomicU32::new(0)),
            }
        }
    }

    fn payload(bytes: &[u8]) -> String {
        ImageInput::from_bytes(bytes, "png").data
    }

    #[async_trait]
    impl VisionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(&self, request: &NameRequest) -> Result<LlmResponse, PipelineError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.answers.get(&request.image.data) {
                Some(text) => Ok(LlmResponse {
                    text: text.clone(),
                    model: "mock-v1".to_string(),
                    latency_ms: 1,
                }),
                None => Err(PipelineError::Llm {
                    message: "Status 500".to_string(),
                    status_code: Some(500),
                }),
            }
        }
    }

    fn renamer_with(provider: MockProvider, naming: NamingOptions) -> Renamer {
        let options = RetryOptions {
            attempts: 3,
            base_delay_ms: 1,
            timeout_ms: 1_000,
        };
        Renamer::new(Suggester::new(Box::new(provider), options), naming, 200)
    }

    fn discover(dir: &Path) -> Vec<ImageFile> {
        FileDiscovery::new(&pixname_core::Config::default().naming)
            .discover(dir)
            .unwrap()
    }

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_renames_all_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"aaa").unwrap();
        fs::write(dir.path().join("b.png"), b"bbb").unwrap();

        let provider = MockProvider::new(&[("aaa", "sunset beach"), ("bbb", "mountain lake")]);
        let renamer = renamer_with(provider, NamingOptions::with_date("trip", "", None));

        let summary =
            rename_batch(&renamer, &discover(dir.path()), &Palette::default(), false).await;

        assert_eq!(summary.total, 2);
        assert_eq!(summary.renamed, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            names_in(dir.path()),
            vec!["trip_mountain_lake.png", "trip_sunset_beach.jpg"]
        );
    }

    #[tokio::test]
    async fn test_failed_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"aaa").unwrap();
        fs::write(dir.path().join("b.png"), b"bbb").unwrap();

        let provider = MockProvider::new(&[("aaa", "sunset beach")]);
        let calls = provider.call_count.clone();
        let renamer = renamer_with(provider, NamingOptions::with_date("trip", "", None));

        let summary =
            rename_batch(&renamer, &discover(dir.path()), &Palette::default(), false).await;

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, 2);
        // 1 call for a.jpg, 3 attempts for b.png
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(names_in(dir.path()), vec!["b.png", "trip_sunset_beach.jpg"]);
    }

    #[tokio::test]
    async fn test_duplicate_suggestions_get_counters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.png"), b"one").unwrap();
        fs::write(dir.path().join("2.png"), b"two").unwrap();
        fs::write(dir.path().join("3.png"), b"three").unwrap();

        let provider =
            MockProvider::new(&[("one", "photo"), ("two", "photo"), ("three", "photo")]);
        let renamer = renamer_with(provider, NamingOptions::default());

        let summary =
            rename_batch(&renamer, &discover(dir.path()), &Palette::default(), false).await;

        assert_eq!(summary.renamed, 3);
        assert_eq!(
            names_in(dir.path()),
            vec!["photo.png", "photo_1.png", "photo_2.png"]
        );
        assert_eq!(fs::read(dir.path().join("photo.png")).unwrap(), b"one");
        assert_eq!(fs::read(dir.path().join("photo_2.png")).unwrap(), b"three");
    }

    #[tokio::test]
    async fn test_subdirectory_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.jpg"), b"inner").unwrap();
        fs::write(dir.path().join("top.jpg"), b"top").unwrap();

        let provider = MockProvider::new(&[("top", "desk"), ("inner", "should_not_happen")]);
        let calls = provider.call_count.clone();
        let renamer = renamer_with(provider, NamingOptions::default());

        let summary =
            rename_batch(&renamer, &discover(dir.path()), &Palette::default(), false).await;

        assert_eq!(summary.total, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(names_in(&nested), vec!["inner.jpg"]);
        assert_eq!(names_in(dir.path()), vec!["desk.jpg", "nested"]);
    }

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct LogBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failures_stay_quiet_at_default_log_level() {
        let logs = LogBuf::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bmp"), b"aaa").unwrap();
        fs::write(dir.path().join("b.webp"), b"bbb").unwrap();

        let provider = MockProvider::new(&[("aaa", "harbor")]);
        let renamer = renamer_with(provider, NamingOptions::default());

        let summary =
            rename_batch(&renamer, &discover(dir.path()), &Palette::default(), false).await;

        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 1);
        let written = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(written.is_empty(), "log lines would cut into the spinner: {written}");
    }
}
