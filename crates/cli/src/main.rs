use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use speechbatch_core::pipeline::batch_logger::StdoutBatchLogger;
use speechbatch_core::pipeline::transcribe_batch_use_case::{
    BatchSummary, RunnerOptions, TranscriptionJobRunner,
};
use speechbatch_core::report::infrastructure::csv_report_writer::CsvReportWriter;
use speechbatch_core::shared::constants::{
    DEFAULT_INPUT_DIR, DEFAULT_LONG_FILES_LOG, DEFAULT_REPORT_FILE,
};
use speechbatch_core::shared::settings::{Credentials, Settings};
use speechbatch_core::speech::infrastructure::google_speech_client::GoogleSpeechClient;

/// Batch transcription of a directory of audio files.
#[derive(Parser)]
#[command(name = "speechbatch")]
struct Cli {
    /// Directory containing the audio files.
    #[arg(default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// CSV report to write (fileName,transcript).
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    output: PathBuf,

    /// File listing audio that needed long-running recognition.
    #[arg(long, default_value = DEFAULT_LONG_FILES_LOG)]
    long_files: PathBuf,

    /// JSON settings file (defaults to the per-user settings, if present).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// API key for the speech service.
    #[arg(long, conflicts_with = "access_token")]
    api_key: Option<String>,

    /// OAuth2 access token for the speech service.
    #[arg(long)]
    access_token: Option<String>,

    /// Speech service base URL.
    #[arg(long)]
    endpoint: Option<String>,

    /// Minimum confidence (exclusive) for a segment to be kept (0.0-1.0).
    #[arg(long)]
    confidence: Option<f32>,

    /// Audio sample rate in Hz.
    #[arg(long)]
    sample_rate: Option<u32>,

    /// BCP-47 language tag.
    #[arg(long)]
    language: Option<String>,

    /// Seconds to wait between long-running operation polls.
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Give up on a long-running operation after this many polls.
    #[arg(long)]
    max_polls: Option<u32>,

    /// Extension of the audio files to process.
    #[arg(long)]
    extension: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = resolve_settings(&cli)?;
    settings.validate()?;
    if settings.credentials.is_none() {
        log::warn!("No credentials configured; requests will be sent unauthenticated");
    }

    let service = GoogleSpeechClient::from_settings(&settings)?;
    log::info!("Using speech endpoint {}", service.endpoint());
    let report = CsvReportWriter::create(&cli.output, &cli.long_files)?;

    let mut runner = TranscriptionJobRunner::new(
        Box::new(service),
        Box::new(report),
        RunnerOptions::from(&settings),
    )
    .with_logger(Box::new(StdoutBatchLogger::new()));

    let summary = runner.run(&cli.input_dir)?;
    report_summary(&summary, &cli.output);
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };

    if let Some(key) = &cli.api_key {
        settings.credentials = Some(Credentials::ApiKey(key.clone()));
    }
    if let Some(token) = &cli.access_token {
        settings.credentials = Some(Credentials::AccessToken(token.clone()));
    }
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(confidence) = cli.confidence {
        settings.confidence_threshold = confidence;
    }
    if let Some(rate) = cli.sample_rate {
        settings.sample_rate_hz = rate;
    }
    if let Some(language) = &cli.language {
        settings.language_code = language.clone();
    }
    if let Some(secs) = cli.poll_interval {
        settings.poll_interval_secs = secs;
    }
    if cli.max_polls.is_some() {
        settings.max_polls = cli.max_polls;
    }
    if let Some(ext) = &cli.extension {
        settings.audio_extension = ext.clone();
    }
    Ok(settings)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input_dir.is_dir() {
        return Err(format!("Input directory not found: {}", cli.input_dir.display()).into());
    }
    if cli.output == cli.long_files {
        return Err("--output and --long-files must be different files".into());
    }
    Ok(())
}

fn report_summary(summary: &BatchSummary, output: &Path) {
    if let Some(reason) = &summary.aborted {
        eprintln!("Speech service unreachable ({reason}). Please check the internet connection");
        eprintln!("{} files converted. Exiting", summary.rows_written);
        return;
    }
    log::info!(
        "{} of {} files transcribed ({} long, {} NA), report written to {}",
        summary.rows_written,
        summary.files_found,
        summary.long_files,
        summary.na_rows,
        output.display()
    );
}
