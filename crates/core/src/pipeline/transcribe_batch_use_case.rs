use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use super::audio_files::list_audio_files;
use super::batch_logger::{BatchLogger, NullBatchLogger};
use super::transcribe_error::TranscribeError;
use super::transcript_filter::report_transcript;
use crate::report::domain::report_row::ReportRow;
use crate::report::domain::report_writer::ReportWriter;
use crate::shared::constants::{
    DEFAULT_AUDIO_EXTENSION, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_POLL_INTERVAL,
};
use crate::shared::settings::Settings;
use crate::speech::domain::recognition_result::SyncResult;
use crate::speech::domain::speech_service::{SpeechService, SyncOutcome};
use crate::speech::domain::transcription_request::{RecognitionConfig, TranscriptionRequest};

/// Blocks the batch between status fetches.
pub type SleepFn = Box<dyn Fn(Duration) + Send>;

#[derive(Clone, Debug, PartialEq)]
pub struct RunnerOptions {
    pub recognition: RecognitionConfig,
    pub confidence_threshold: f32,
    pub poll_interval: Duration,
    pub max_polls: Option<u32>,
    pub audio_extension: String,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            recognition: RecognitionConfig::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
        }
    }
}

impl From<&Settings> for RunnerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            recognition: settings.recognition_config(),
            confidence_threshold: settings.confidence_threshold,
            poll_interval: settings.poll_interval(),
            max_polls: settings.max_polls,
            audio_extension: settings.audio_extension.clone(),
        }
    }
}

/// What a batch run got through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_found: usize,
    pub rows_written: usize,
    pub long_files: usize,
    pub na_rows: usize,
    /// Set when the service became unreachable and the batch stopped early.
    pub aborted: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Sync,
    LongRunning,
}

/// Transcribes a directory of audio files one at a time.
///
/// Each file goes to synchronous recognition first. A rejection (typically
/// audio longer than the synchronous limit) logs the file as long and
/// resubmits it as a long-running operation that is polled at a fixed
/// interval until done. An unreachable service stops the whole batch; rows
/// already written stay in the report.
pub struct TranscriptionJobRunner {
    service: Box<dyn SpeechService>,
    report: Box<dyn ReportWriter>,
    options: RunnerOptions,
    sleep: SleepFn,
    logger: Box<dyn BatchLogger>,
}

impl TranscriptionJobRunner {
    pub fn new(
        service: Box<dyn SpeechService>,
        report: Box<dyn ReportWriter>,
        options: RunnerOptions,
    ) -> Self {
        Self {
            service,
            report,
            options,
            sleep: Box::new(thread::sleep),
            logger: Box::new(NullBatchLogger),
        }
    }

    pub fn with_sleep(mut self, sleep: SleepFn) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn BatchLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    fn build_request(&self, path: &Path) -> Result<TranscriptionRequest, TranscribeError> {
        let audio = fs::read(path).map_err(|e| TranscribeError::ReadAudio {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(TranscriptionRequest::new(audio, &self.options.recognition))
    }

    /// One blocking recognition call.
    pub fn transcribe_sync(&mut self, path: &Path) -> Result<SyncResult, TranscribeError> {
        let request = self.build_request(path)?;
        let started = Instant::now();
        let outcome = self.service.submit_sync(&request);
        self.logger
            .timing("sync", started.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            SyncOutcome::Success(result) => Ok(result),
            SyncOutcome::Rejected(reason) => Err(TranscribeError::RequestRejected(reason)),
            SyncOutcome::Unavailable(reason) => Err(TranscribeError::ServiceUnavailable(reason)),
        }
    }

    /// Submits a long-running operation, then sleeps and polls until it
    /// reports done. Always polls at least once.
    pub fn transcribe_async(&mut self, path: &Path) -> Result<SyncResult, TranscribeError> {
        let request = self.build_request(path)?;
        let started = Instant::now();
        let name = self.service.submit_async(&request)?.name;
        log::info!("Submitted operation {name}, waiting for server processing");

        let mut attempts: u32 = 0;
        let op = loop {
            if let Some(max) = self.options.max_polls {
                if attempts >= max {
                    return Err(TranscribeError::Timeout { name, attempts });
                }
            }
            (self.sleep)(self.options.poll_interval);
            let op = self.service.poll_operation(&name)?;
            attempts += 1;
            if op.done {
                break op;
            }
            log::debug!("Operation {name} still running after {attempts} polls");
        };

        self.logger.metric("polls", f64::from(attempts));
        self.logger
            .timing("async", started.elapsed().as_secs_f64() * 1000.0);

        if let Some(err) = op.error {
            return Err(TranscribeError::OperationFailed {
                name,
                code: err.code,
                message: err.message,
            });
        }
        Ok(op.result.unwrap_or_default())
    }

    /// Produces the report row for one file, falling back to the
    /// long-running path when synchronous recognition is rejected.
    pub fn process_file(&mut self, path: &Path) -> Result<ReportRow, TranscribeError> {
        let file_name = file_name_of(path);
        self.process(path, &file_name).map(|(row, _)| row)
    }

    fn process(
        &mut self,
        path: &Path,
        file_name: &str,
    ) -> Result<(ReportRow, Route), TranscribeError> {
        let (result, route) = match self.transcribe_sync(path) {
            Ok(result) => (result, Route::Sync),
            Err(TranscribeError::RequestRejected(reason)) => {
                log::warn!(
                    "{file_name} rejected by synchronous recognition, probably too long ({reason}); \
                     retrying as a long-running operation"
                );
                self.report.log_long_file(file_name)?;
                match self.transcribe_async(path) {
                    Ok(result) => (result, Route::LongRunning),
                    Err(e) if e.is_per_file() => {
                        log::warn!("{file_name}: {e}");
                        return Ok((ReportRow::not_available(file_name), Route::LongRunning));
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };

        let transcript = report_transcript(&result, self.options.confidence_threshold);
        Ok((ReportRow::new(file_name, transcript), route))
    }

    /// Processes every matching file in `dir`, appending one row each.
    ///
    /// Returns `Ok` with `aborted` set when the service became unreachable;
    /// only local I/O failures surface as `Err`.
    pub fn run(&mut self, dir: &Path) -> Result<BatchSummary, TranscribeError> {
        let files = list_audio_files(dir, &self.options.audio_extension).map_err(|e| {
            TranscribeError::ListDirectory {
                path: dir.to_path_buf(),
                source: e,
            }
        })?;

        let total = files.len();
        let mut summary = BatchSummary {
            files_found: total,
            ..BatchSummary::default()
        };

        for (idx, path) in files.iter().enumerate() {
            let file_name = file_name_of(path);
            self.logger.progress(idx + 1, total, &file_name);

            match self.process(path, &file_name) {
                Ok((row, route)) => {
                    self.report.write_row(&row)?;
                    summary.rows_written += 1;
                    if route == Route::LongRunning {
                        summary.long_files += 1;
                    }
                    if row.is_not_available() {
                        summary.na_rows += 1;
                    }
                }
                Err(TranscribeError::ServiceUnavailable(reason)) => {
                    log::error!("Speech service unreachable, check the network connection: {reason}");
                    self.logger
                        .info(&format!("Stopped at {file_name}, remaining files skipped"));
                    summary.aborted = Some(reason);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        self.logger.summary();
        Ok(summary)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::domain::report_writer::ReportError;
    use crate::speech::domain::async_operation::AsyncOperation;
    use crate::speech::domain::recognition_result::{Alternative, ResultSegment};
    use crate::speech::domain::speech_service::SpeechServiceError;
    use std::collections::{HashMap, VecDeque};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    // ─── Stubs ───

    #[derive(Default)]
    struct Calls {
        sync: Vec<String>,
        submitted: Vec<String>,
        polls: Vec<String>,
        /// Sleeps and polls interleaved in call order.
        events: Vec<&'static str>,
    }

    /// Scripted service keyed by the audio bytes, which tests set to the
    /// file's stem so each file can behave differently.
    #[derive(Default)]
    struct StubSpeechService {
        sync: HashMap<String, SyncOutcome>,
        submit: HashMap<String, Result<AsyncOperation, SpeechServiceError>>,
        polls: Mutex<HashMap<String, VecDeque<Result<AsyncOperation, SpeechServiceError>>>>,
        calls: Arc<Mutex<Calls>>,
    }

    impl StubSpeechService {
        fn on_sync(mut self, key: &str, outcome: SyncOutcome) -> Self {
            self.sync.insert(key.to_string(), outcome);
            self
        }

        fn on_async(
            mut self,
            key: &str,
            op_name: &str,
            polls: Vec<Result<AsyncOperation, SpeechServiceError>>,
        ) -> Self {
            self.submit
                .insert(key.to_string(), Ok(AsyncOperation::pending(op_name)));
            self.polls
                .get_mut()
                .unwrap()
                .insert(op_name.to_string(), polls.into());
            self
        }

        fn on_submit_error(mut self, key: &str, err: SpeechServiceError) -> Self {
            self.submit.insert(key.to_string(), Err(err));
            self
        }
    }

    fn key_of(request: &TranscriptionRequest) -> String {
        String::from_utf8_lossy(request.audio()).into_owned()
    }

    impl SpeechService for StubSpeechService {
        fn submit_sync(&self, request: &TranscriptionRequest) -> SyncOutcome {
            let key = key_of(request);
            self.calls.lock().unwrap().sync.push(key.clone());
            self.sync
                .get(&key)
                .cloned()
                .unwrap_or(SyncOutcome::Success(SyncResult::default()))
        }

        fn submit_async(
            &self,
            request: &TranscriptionRequest,
        ) -> Result<AsyncOperation, SpeechServiceError> {
            let key = key_of(request);
            self.calls.lock().unwrap().submitted.push(key.clone());
            self.submit
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Err(SpeechServiceError::Rejected("unscripted".into())))
        }

        fn poll_operation(&self, name: &str) -> Result<AsyncOperation, SpeechServiceError> {
            let mut calls = self.calls.lock().unwrap();
            calls.polls.push(name.to_string());
            calls.events.push("poll");
            drop(calls);
            self.polls
                .lock()
                .unwrap()
                .get_mut(name)
                .and_then(|q| q.pop_front())
                .unwrap_or_else(|| Ok(AsyncOperation::pending(name)))
        }
    }

    #[derive(Default)]
    struct Written {
        rows: Vec<ReportRow>,
        long_files: Vec<String>,
    }

    struct RecordingReport {
        written: Arc<Mutex<Written>>,
    }

    impl ReportWriter for RecordingReport {
        fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
            self.written.lock().unwrap().rows.push(row.clone());
            Ok(())
        }

        fn log_long_file(&mut self, file_name: &str) -> Result<(), ReportError> {
            self.written
                .lock()
                .unwrap()
                .long_files
                .push(file_name.to_string());
            Ok(())
        }
    }

    struct RecordingLogger {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl BatchLogger for RecordingLogger {
        fn progress(&mut self, _current: usize, _total: usize, _file_name: &str) {}
        fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn info(&mut self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    struct Harness {
        runner: TranscriptionJobRunner,
        calls: Arc<Mutex<Calls>>,
        written: Arc<Mutex<Written>>,
        sleeps: Arc<Mutex<Vec<Duration>>>,
        messages: Arc<Mutex<Vec<String>>>,
    }

    fn harness(service: StubSpeechService, options: RunnerOptions) -> Harness {
        let calls = service.calls.clone();
        let written = Arc::new(Mutex::new(Written::default()));
        let sleeps = Arc::new(Mutex::new(Vec::new()));
        let recorded = sleeps.clone();
        let events = calls.clone();
        let messages = Arc::new(Mutex::new(Vec::new()));
        let runner = TranscriptionJobRunner::new(
            Box::new(service),
            Box::new(RecordingReport {
                written: written.clone(),
            }),
            options,
        )
        .with_sleep(Box::new(move |d| {
            recorded.lock().unwrap().push(d);
            events.lock().unwrap().events.push("sleep");
        }))
        .with_logger(Box::new(RecordingLogger {
            messages: messages.clone(),
        }));
        Harness {
            runner,
            calls,
            written,
            sleeps,
            messages,
        }
    }

    fn result(segments: &[(&str, f32)]) -> SyncResult {
        SyncResult::new(
            segments
                .iter()
                .map(|(t, c)| {
                    ResultSegment::new(vec![Alternative {
                        transcript: t.to_string(),
                        confidence: *c,
                    }])
                })
                .collect(),
        )
    }

    /// Creates `<stem>.wav` files whose content is the stem itself.
    fn audio_dir(stems: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for stem in stems {
            fs::write(tmp.path().join(format!("{stem}.wav")), stem.as_bytes()).unwrap();
        }
        tmp
    }

    fn wav(dir: &TempDir, stem: &str) -> PathBuf {
        dir.path().join(format!("{stem}.wav"))
    }

    // ─── Batch scenarios ───

    #[test]
    fn test_sync_async_and_abort_scenario() {
        let dir = audio_dir(&["a", "b", "c", "d"]);
        let service = StubSpeechService::default()
            .on_sync(
                "a",
                SyncOutcome::Success(result(&[("hello from a", 0.9), ("noise", 0.3)])),
            )
            .on_sync("b", SyncOutcome::Rejected("400: audio too long".into()))
            .on_async(
                "b",
                "op-b",
                vec![
                    Ok(AsyncOperation::pending("op-b")),
                    Ok(AsyncOperation::completed(
                        "op-b",
                        result(&[("long message from b", 0.8)]),
                    )),
                ],
            )
            .on_sync("c", SyncOutcome::Unavailable("server not found".into()));

        let mut h = harness(service, RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        let written = h.written.lock().unwrap();
        assert_eq!(
            written.rows,
            vec![
                ReportRow::new("a.wav", "hello from a"),
                ReportRow::new("b.wav", "long message from b"),
            ]
        );
        assert_eq!(written.long_files, vec!["b.wav"]);

        let calls = h.calls.lock().unwrap();
        assert_eq!(calls.sync, vec!["a", "b", "c"]);
        assert_eq!(calls.polls.len(), 2);

        assert_eq!(summary.files_found, 4);
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.long_files, 1);
        assert_eq!(summary.aborted.as_deref(), Some("server not found"));
    }

    #[test]
    fn test_abort_logs_stop_point_once() {
        let dir = audio_dir(&["a", "b"]);
        let service = StubSpeechService::default()
            .on_sync("b", SyncOutcome::Unavailable("server not found".into()));

        let mut h = harness(service, RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        assert_eq!(summary.rows_written, 1);
        let messages = h.messages.lock().unwrap();
        assert_eq!(*messages, vec!["Stopped at b.wav, remaining files skipped"]);
        assert!(messages.iter().all(|m| !m.contains("files converted")));
    }

    #[test]
    fn test_one_row_per_file_named_after_input() {
        let dir = audio_dir(&["x", "y", "z"]);
        let service = StubSpeechService::default()
            .on_sync("x", SyncOutcome::Success(result(&[("ex", 0.95)])))
            .on_sync("y", SyncOutcome::Success(result(&[("why", 0.1)])));

        let mut h = harness(service, RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        let rows = &h.written.lock().unwrap().rows;
        let names: Vec<_> = rows.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["x.wav", "y.wav", "z.wav"]);
        assert_eq!(rows[1].transcript, "NA");
        assert_eq!(rows[2].transcript, "NA");
        assert_eq!(summary.na_rows, 2);
        assert!(summary.aborted.is_none());
    }

    #[test]
    fn test_non_matching_files_skipped() {
        let dir = audio_dir(&["a"]);
        fs::write(dir.path().join("readme.txt"), b"readme").unwrap();
        fs::write(dir.path().join("b.mp3"), b"b").unwrap();

        let mut h = harness(StubSpeechService::default(), RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        assert_eq!(summary.files_found, 1);
        assert_eq!(h.calls.lock().unwrap().sync, vec!["a"]);
    }

    #[test]
    fn test_custom_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.raw"), b"a").unwrap();
        fs::write(tmp.path().join("b.wav"), b"b").unwrap();

        let options = RunnerOptions {
            audio_extension: "raw".to_string(),
            ..RunnerOptions::default()
        };
        let mut h = harness(StubSpeechService::default(), options);
        h.runner.run(tmp.path()).unwrap();
        assert_eq!(h.calls.lock().unwrap().sync, vec!["a"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let mut h = harness(StubSpeechService::default(), RunnerOptions::default());
        let err = h.runner.run(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, TranscribeError::ListDirectory { .. }));
    }

    #[test]
    fn test_unavailable_during_polling_aborts_batch() {
        let dir = audio_dir(&["a", "b"]);
        let service = StubSpeechService::default()
            .on_sync("a", SyncOutcome::Rejected("too long".into()))
            .on_async(
                "a",
                "op-a",
                vec![Err(SpeechServiceError::Unavailable("connection reset".into()))],
            );

        let mut h = harness(service, RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        assert!(h.written.lock().unwrap().rows.is_empty());
        assert_eq!(summary.rows_written, 0);
        assert_eq!(summary.aborted.as_deref(), Some("connection reset"));
        assert_eq!(h.calls.lock().unwrap().sync, vec!["a"]);
    }

    #[test]
    fn test_async_submit_rejected_writes_na_and_continues() {
        let dir = audio_dir(&["a", "b"]);
        let service = StubSpeechService::default()
            .on_sync("a", SyncOutcome::Rejected("too long".into()))
            .on_submit_error("a", SpeechServiceError::Rejected("403".into()))
            .on_sync("b", SyncOutcome::Success(result(&[("bee", 0.9)])));

        let mut h = harness(service, RunnerOptions::default());
        let summary = h.runner.run(dir.path()).unwrap();

        let written = h.written.lock().unwrap();
        assert_eq!(
            written.rows,
            vec![ReportRow::not_available("a.wav"), ReportRow::new("b.wav", "bee")]
        );
        assert_eq!(written.long_files, vec!["a.wav"]);
        assert_eq!(summary.long_files, 1);
        assert_eq!(summary.na_rows, 1);
    }

    // ─── Long-running path ───

    #[test]
    fn test_async_polls_exactly_until_done() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default().on_async(
            "a",
            "op-a",
            vec![
                Ok(AsyncOperation::pending("op-a")),
                Ok(AsyncOperation::pending("op-a")),
                Ok(AsyncOperation::completed("op-a", result(&[("done", 0.7)]))),
                Ok(AsyncOperation::completed("op-a", result(&[("never read", 0.7)]))),
            ],
        );

        let mut h = harness(service, RunnerOptions::default());
        let got = h.runner.transcribe_async(&wav(&dir, "a")).unwrap();

        assert_eq!(got, result(&[("done", 0.7)]));
        assert_eq!(h.calls.lock().unwrap().polls, vec!["op-a"; 3]);
        assert_eq!(*h.sleeps.lock().unwrap(), vec![Duration::from_secs(5); 3]);
        assert_eq!(
            h.calls.lock().unwrap().events,
            vec!["sleep", "poll", "sleep", "poll", "sleep", "poll"]
        );
    }

    #[test]
    fn test_async_uses_configured_interval() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default().on_async(
            "a",
            "op-a",
            vec![Ok(AsyncOperation::completed("op-a", SyncResult::default()))],
        );
        let options = RunnerOptions {
            poll_interval: Duration::from_millis(250),
            ..RunnerOptions::default()
        };

        let mut h = harness(service, options);
        h.runner.transcribe_async(&wav(&dir, "a")).unwrap();
        assert_eq!(*h.sleeps.lock().unwrap(), vec![Duration::from_millis(250)]);
    }

    #[test]
    fn test_async_done_without_result_is_empty() {
        let dir = audio_dir(&["a"]);
        let mut done = AsyncOperation::pending("op-a");
        done.done = true;
        let service = StubSpeechService::default().on_async("a", "op-a", vec![Ok(done)]);

        let mut h = harness(service, RunnerOptions::default());
        assert!(h.runner.transcribe_async(&wav(&dir, "a")).unwrap().is_empty());
    }

    #[test]
    fn test_async_max_polls_times_out() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default().on_async("a", "op-a", vec![]);
        let options = RunnerOptions {
            max_polls: Some(4),
            ..RunnerOptions::default()
        };

        let mut h = harness(service, options);
        let err = h.runner.transcribe_async(&wav(&dir, "a")).unwrap_err();

        assert!(matches!(
            err,
            TranscribeError::Timeout { ref name, attempts: 4 } if name == "op-a"
        ));
        assert_eq!(h.calls.lock().unwrap().polls.len(), 4);
    }

    #[test]
    fn test_timeout_yields_na_row() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default()
            .on_sync("a", SyncOutcome::Rejected("too long".into()))
            .on_async("a", "op-a", vec![]);
        let options = RunnerOptions {
            max_polls: Some(2),
            ..RunnerOptions::default()
        };

        let mut h = harness(service, options);
        let row = h.runner.process_file(&wav(&dir, "a")).unwrap();
        assert_eq!(row, ReportRow::not_available("a.wav"));
    }

    #[test]
    fn test_failed_operation_is_reported() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default().on_async(
            "a",
            "op-a",
            vec![Ok(AsyncOperation::failed("op-a", 3, "invalid sample rate"))],
        );

        let mut h = harness(service, RunnerOptions::default());
        let err = h.runner.transcribe_async(&wav(&dir, "a")).unwrap_err();
        assert!(matches!(err, TranscribeError::OperationFailed { code: 3, .. }));
    }

    // ─── Single file ───

    #[test]
    fn test_process_file_applies_threshold() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default().on_sync(
            "a",
            SyncOutcome::Success(result(&[("one", 0.65), ("two", 0.55), ("three", 0.75)])),
        );
        let options = RunnerOptions {
            confidence_threshold: 0.6,
            ..RunnerOptions::default()
        };

        let mut h = harness(service, options);
        let row = h.runner.process_file(&wav(&dir, "a")).unwrap();
        assert_eq!(row, ReportRow::new("a.wav", "one three"));
        assert!(h.calls.lock().unwrap().submitted.is_empty());
    }

    #[test]
    fn test_process_file_unavailable_is_error() {
        let dir = audio_dir(&["a"]);
        let service = StubSpeechService::default()
            .on_sync("a", SyncOutcome::Unavailable("offline".into()));

        let mut h = harness(service, RunnerOptions::default());
        let err = h.runner.process_file(&wav(&dir, "a")).unwrap_err();
        assert!(matches!(err, TranscribeError::ServiceUnavailable(_)));
        assert!(h.written.lock().unwrap().long_files.is_empty());
    }

    #[test]
    fn test_transcribe_sync_missing_file_is_read_error() {
        let dir = audio_dir(&[]);
        let mut h = harness(StubSpeechService::default(), RunnerOptions::default());
        let err = h.runner.transcribe_sync(&wav(&dir, "ghost")).unwrap_err();
        assert!(matches!(err, TranscribeError::ReadAudio { .. }));
        assert!(h.calls.lock().unwrap().sync.is_empty());
    }

    #[test]
    fn test_options_from_settings() {
        let settings = Settings {
            confidence_threshold: 0.8,
            poll_interval_secs: 2,
            max_polls: Some(10),
            audio_extension: "flac".to_string(),
            ..Settings::default()
        };
        let options = RunnerOptions::from(&settings);
        assert_eq!(options.poll_interval, Duration::from_secs(2));
        assert_eq!(options.max_polls, Some(10));
        assert_eq!(options.audio_extension, "flac");
        assert!((options.confidence_threshold - 0.8).abs() < f32::EPSILON);
    }
}
