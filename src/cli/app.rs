//! Main app runner for a pipeline batch run

use std::env;
use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::{IngestCallbacks, IngestOptions, IngestPipeline, RunSummary};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::infrastructure::{
    HttpCallbackNotifier, HttpRecordingSource, OpenAiSummarizer, OpenAiTranscriber,
    SupabaseObjectStore, SupabaseRecordStore, XdgConfigStore,
};

use super::args::RunOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Settings the pipeline cannot run without
struct RequiredSettings {
    openai_api_key: String,
    supabase_url: String,
    supabase_key: String,
    source_base_url: String,
}

impl RequiredSettings {
    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: AppConfig::require(
                &config.openai_api_key,
                "openai_api_key",
                "OPENAI_API_KEY",
            )?,
            supabase_url: AppConfig::require(&config.supabase_url, "supabase_url", "SUPABASE_URL")?,
            supabase_key: AppConfig::require(&config.supabase_key, "supabase_key", "SUPABASE_KEY")?,
            source_base_url: AppConfig::require(
                &config.source_base_url,
                "source_base_url",
                "RECORDINGS_API_URL",
            )?,
        })
    }
}

/// Run one pipeline batch
pub async fn run_pipeline(config: AppConfig, options: RunOptions) -> ExitCode {
    let presenter = Presenter::new();

    let settings = match RequiredSettings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // One HTTP client with a bounded timeout, shared by every adapter
    let client = match reqwest::Client::builder()
        .timeout(config.request_timeout_or_default())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            presenter.error(&format!("Failed to build HTTP client: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters
    let source = HttpRecordingSource::new(
        client.clone(),
        settings.source_base_url,
        config.source_token.clone(),
    );
    let object_store = SupabaseObjectStore::new(
        client.clone(),
        settings.supabase_url.clone(),
        settings.supabase_key.clone(),
        config.storage_bucket_or_default(),
    );
    let transcriber = OpenAiTranscriber::new(
        client.clone(),
        settings.openai_api_key.clone(),
        config.transcription_model_or_default(),
    );
    let summarizer = OpenAiSummarizer::new(
        client.clone(),
        settings.openai_api_key,
        config.summary_model_or_default(),
    );
    let record_store = SupabaseRecordStore::new(
        client.clone(),
        settings.supabase_url,
        settings.supabase_key,
        config.table_or_default(),
    );

    let notifier = config
        .callback_url
        .clone()
        .map(|url| HttpCallbackNotifier::new(client, url));
    if notifier.is_none() {
        presenter.warn("No callback URL configured; results will not be posted back");
    }

    // Create the pipeline
    let pipeline = IngestPipeline::new(
        source,
        object_store,
        transcriber,
        summarizer,
        record_store,
        notifier,
    );

    let ingest_options = IngestOptions {
        limit: options.limit,
        max_records: config.max_records.map(|n| n as usize),
        dry_run: options.dry_run,
    };

    // Per-job progress on stderr
    let callbacks = IngestCallbacks {
        on_job_start: Some(Box::new(|file_id: &str| {
            eprintln!("{} Processing {}", "⠋", file_id);
        })),
        on_stage: Some(Box::new(|_file_id: &str, stage| {
            eprintln!("  … {}", stage);
        })),
        on_job_completed: Some(Box::new(|file_id: &str| {
            eprintln!("{} {} transcribed", "✓", file_id);
        })),
        on_job_failed: Some(Box::new(|file_id: &str, stage, message: &str| {
            eprintln!("{} {} failed at {}: {}", "✗", file_id, stage, message);
        })),
    };

    // Execute
    match pipeline.run(ingest_options, callbacks).await {
        Ok(summary) => {
            report_summary(&presenter, &summary, options.dry_run);
            if summary.is_clean() {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn report_summary(presenter: &Presenter, summary: &RunSummary, dry_run: bool) {
    if let Some(count) = summary.capped_at {
        presenter.warn(&format!(
            "Record cap reached ({} rows); nothing processed",
            count
        ));
        return;
    }

    if dry_run {
        presenter.info(&format!(
            "{} recordings discovered, {} already ingested",
            summary.discovered, summary.skipped
        ));
        if summary.pending.is_empty() {
            presenter.info("Nothing to process");
        } else {
            for file_id in &summary.pending {
                presenter.output(file_id);
            }
        }
        return;
    }

    presenter.info(&format!(
        "{} discovered, {} skipped, {} transcribed, {} failed",
        summary.discovered,
        summary.skipped,
        summary.completed,
        summary.failures.len()
    ));

    for failure in &summary.failures {
        presenter.error(&format!(
            "{} failed at {}: {}",
            failure.file_id, failure.stage, failure.message
        ));
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        openai_api_key: env_value("OPENAI_API_KEY"),
        supabase_url: env_value("SUPABASE_URL"),
        supabase_key: env_value("SUPABASE_KEY"),
        source_base_url: env_value("RECORDINGS_API_URL"),
        source_token: env_value("RECORDINGS_API_TOKEN"),
        callback_url: env_value("CALLBACK_URL"),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}
