//! Ingest pipeline use case

use std::fmt;

use thiserror::Error;

use crate::domain::record::{CallbackPayload, RecordPatch};
use crate::domain::recording::RecordingDescriptor;
use crate::domain::transcript::TranscriptData;

use super::ports::{
    CallbackError, CallbackNotifier, FetchError, ObjectStore, PersistenceError, RecordStore,
    RecordingSource, StorageError, SummarizationError, Summarizer, Transcriber,
    TranscriptionError,
};

/// Pipeline stages, in execution order per job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Download the audio from the recordings API
    Fetch,
    /// Upload the audio to the object store
    Store,
    /// Speech-to-text
    Transcribe,
    /// Structured summary extraction
    Summarize,
    /// Record store writes
    Persist,
    /// Callback POST
    Notify,
}

impl Stage {
    /// The stage label used in job reporting
    pub fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Store => "store",
            Self::Transcribe => "transcribe",
            Self::Summarize => "summarize",
            Self::Persist => "persist",
            Self::Notify => "notify",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stage failure for a single job
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Summarization(#[from] SummarizationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Callback(#[from] CallbackError),
}

impl StageError {
    /// The stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            Self::Fetch(_) => Stage::Fetch,
            Self::Storage(_) => Stage::Store,
            Self::Transcription(_) => Stage::Transcribe,
            Self::Summarization(_) => Stage::Summarize,
            Self::Persistence(_) => Stage::Persist,
            Self::Callback(_) => Stage::Notify,
        }
    }
}

/// A run-level failure that prevents any job from being processed
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to list recordings: {0}")]
    Listing(#[from] FetchError),

    #[error("Failed to query the record store: {0}")]
    Query(#[from] PersistenceError),
}

/// Per-job failure entry in the run summary
#[derive(Debug)]
pub struct JobFailure {
    pub file_id: String,
    pub stage: Stage,
    pub message: String,
}

/// Outcome of one pipeline run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Entries in the source listing
    pub discovered: usize,
    /// Entries filtered out because the record store already has their row
    pub skipped: usize,
    /// Jobs whose transcript data was fully persisted this run
    pub completed: usize,
    /// File ids that would be processed (populated on dry runs only)
    pub pending: Vec<String>,
    /// Per-job failures, in processing order
    pub failures: Vec<JobFailure>,
    /// Set when the run stopped because the record cap was reached
    pub capped_at: Option<usize>,
}

impl RunSummary {
    /// True when every processed job completed and was notified
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Input parameters for a pipeline run
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Process at most this many new jobs this run
    pub limit: Option<usize>,
    /// Stop before listing when the record store already holds this many rows
    pub max_records: Option<usize>,
    /// List the new jobs without processing them
    pub dry_run: bool,
}

/// Callbacks for per-job progress reporting
#[derive(Default)]
pub struct IngestCallbacks {
    /// Called when a job starts, with its file id
    pub on_job_start: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when a job enters a stage
    pub on_stage: Option<Box<dyn Fn(&str, Stage) + Send + Sync>>,
    /// Called when a job's transcript data is fully persisted
    pub on_job_completed: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when a stage fails, with the stage and error message
    pub on_job_failed: Option<Box<dyn Fn(&str, Stage, &str) + Send + Sync>>,
}

impl IngestCallbacks {
    fn stage(&self, file_id: &str, stage: Stage) {
        if let Some(ref cb) = self.on_stage {
            cb(file_id, stage);
        }
    }
}

/// Batch ingest use case.
///
/// Drives each new recording through fetch, store, transcribe, summarize,
/// persist, and notify. A stage failure skips the remaining stages for that
/// job only; the batch always runs to the end of the listing.
pub struct IngestPipeline<S, O, T, M, R, C>
where
    S: RecordingSource,
    O: ObjectStore,
    T: Transcriber,
    M: Summarizer,
    R: RecordStore,
    C: CallbackNotifier,
{
    source: S,
    object_store: O,
    transcriber: T,
    summarizer: M,
    record_store: R,
    /// None when no callback endpoint is configured; the notify stage is
    /// then skipped
    notifier: Option<C>,
}

impl<S, O, T, M, R, C> IngestPipeline<S, O, T, M, R, C>
where
    S: RecordingSource,
    O: ObjectStore,
    T: Transcriber,
    M: Summarizer,
    R: RecordStore,
    C: CallbackNotifier,
{
    /// Create a new pipeline instance
    pub fn new(
        source: S,
        object_store: O,
        transcriber: T,
        summarizer: M,
        record_store: R,
        notifier: Option<C>,
    ) -> Self {
        Self {
            source,
            object_store,
            transcriber,
            summarizer,
            record_store,
            notifier,
        }
    }

    /// Execute one batch run
    pub async fn run(
        &self,
        options: IngestOptions,
        callbacks: IngestCallbacks,
    ) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();

        if let Some(cap) = options.max_records {
            let count = self.record_store.record_count().await?;
            if count >= cap {
                summary.capped_at = Some(count);
                return Ok(summary);
            }
        }

        let listing = self.source.list_recordings().await?;
        let seen = self.record_store.seen_file_ids().await?;

        summary.discovered = listing.len();

        let mut jobs: Vec<RecordingDescriptor> = listing
            .into_iter()
            .filter(|recording| !seen.contains(recording.file_id()))
            .collect();
        summary.skipped = summary.discovered - jobs.len();

        if let Some(limit) = options.limit {
            jobs.truncate(limit);
        }

        if options.dry_run {
            summary.pending = jobs
                .iter()
                .map(|recording| recording.file_id().to_string())
                .collect();
            return Ok(summary);
        }

        for job in &jobs {
            let file_id = job.file_id();

            if let Some(ref cb) = callbacks.on_job_start {
                cb(file_id);
            }

            let transcript = match self.transcribe_job(job, &callbacks).await {
                Ok(transcript) => transcript,
                Err(e) => {
                    self.record_failure(&mut summary, &callbacks, file_id, &e);
                    continue;
                }
            };

            summary.completed += 1;
            if let Some(ref cb) = callbacks.on_job_completed {
                cb(file_id);
            }

            if let Err(e) = self.notify_job(job, transcript, &callbacks).await {
                self.record_failure(&mut summary, &callbacks, file_id, &e);
            }
        }

        Ok(summary)
    }

    /// Stages 1-5: fetch, store, transcribe, summarize, with incremental
    /// persistence after each write-worthy step
    async fn transcribe_job(
        &self,
        job: &RecordingDescriptor,
        callbacks: &IngestCallbacks,
    ) -> Result<TranscriptData, StageError> {
        let file_id = job.file_id();

        callbacks.stage(file_id, Stage::Fetch);
        let audio = self.source.fetch_audio(job).await?;

        callbacks.stage(file_id, Stage::Store);
        let reference = self
            .object_store
            .upload(file_id, job.file_extension(), &audio)
            .await?;
        self.record_store
            .upsert(&RecordPatch::stored(job, reference))
            .await?;

        callbacks.stage(file_id, Stage::Transcribe);
        let text = self.transcriber.transcribe(&audio).await?;
        self.record_store
            .upsert(&RecordPatch::transcript(
                file_id,
                TranscriptData::text_only(text.clone()),
            ))
            .await?;

        callbacks.stage(file_id, Stage::Summarize);
        let call_summary = self.summarizer.summarize(&text).await?;
        let transcript = TranscriptData::new(text, call_summary);
        self.record_store
            .upsert(&RecordPatch::transcript(file_id, transcript.clone()))
            .await?;

        Ok(transcript)
    }

    /// Stage 6: POST the payload and persist the raw response
    async fn notify_job(
        &self,
        job: &RecordingDescriptor,
        transcript: TranscriptData,
        callbacks: &IngestCallbacks,
    ) -> Result<(), StageError> {
        let Some(ref notifier) = self.notifier else {
            return Ok(());
        };

        callbacks.stage(job.file_id(), Stage::Notify);
        let payload = CallbackPayload::completed(job, transcript);
        let response = notifier.notify(&payload).await?;
        self.record_store
            .upsert(&RecordPatch::callback(job.file_id(), response))
            .await?;

        Ok(())
    }

    fn record_failure(
        &self,
        summary: &mut RunSummary,
        callbacks: &IngestCallbacks,
        file_id: &str,
        error: &StageError,
    ) {
        let stage = error.stage();
        let message = error.to_string();
        if let Some(ref cb) = callbacks.on_job_failed {
            cb(file_id, stage, &message);
        }
        summary.failures.push(JobFailure {
            file_id: file_id.to_string(),
            stage,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::{AudioData, AudioMimeType};
    use crate::domain::transcript::CallSummary;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    // Mock implementations for testing

    struct MockSource {
        listing: Vec<RecordingDescriptor>,
    }

    #[async_trait]
    impl RecordingSource for MockSource {
        async fn list_recordings(&self) -> Result<Vec<RecordingDescriptor>, FetchError> {
            Ok(self.listing.clone())
        }

        async fn fetch_audio(
            &self,
            _recording: &RecordingDescriptor,
        ) -> Result<AudioData, FetchError> {
            Ok(AudioData::new(vec![0u8; 16], AudioMimeType::Wav))
        }
    }

    struct MockObjectStore;

    #[async_trait]
    impl ObjectStore for MockObjectStore {
        async fn upload(
            &self,
            file_id: &str,
            extension: &str,
            _audio: &AudioData,
        ) -> Result<String, StorageError> {
            Ok(format!("https://store/{}.{}", file_id, extension))
        }
    }

    struct MockTranscriber;

    #[async_trait]
    impl Transcriber for MockTranscriber {
        async fn transcribe(&self, _audio: &AudioData) -> Result<String, TranscriptionError> {
            Ok("Test transcription".to_string())
        }
    }

    struct MockSummarizer;

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(&self, _transcript: &str) -> Result<CallSummary, SummarizationError> {
            Ok(CallSummary {
                configuration: Some("2BHK".to_string()),
                ..Default::default()
            })
        }
    }

    #[derive(Default, Clone)]
    struct MockRecordStore {
        seen: HashSet<String>,
        upserts: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl RecordStore for MockRecordStore {
        async fn seen_file_ids(&self) -> Result<HashSet<String>, PersistenceError> {
            Ok(self.seen.clone())
        }

        async fn record_count(&self) -> Result<usize, PersistenceError> {
            Ok(self.seen.len())
        }

        async fn upsert(&self, _patch: &RecordPatch) -> Result<(), PersistenceError> {
            *self.upserts.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct MockNotifier;

    #[async_trait]
    impl CallbackNotifier for MockNotifier {
        async fn notify(&self, _payload: &CallbackPayload) -> Result<String, CallbackError> {
            Ok("{\"ok\":true}".to_string())
        }
    }

    fn listing(ids: &[&str]) -> Vec<RecordingDescriptor> {
        ids.iter()
            .map(|id| RecordingDescriptor::new(*id, Some("p1".to_string()), "wav"))
            .collect()
    }

    #[tokio::test]
    async fn run_processes_every_new_job() {
        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a", "b"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            MockRecordStore::default(),
            Some(MockNotifier),
        );

        let summary = pipeline
            .run(IngestOptions::default(), IngestCallbacks::default())
            .await
            .unwrap();

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.completed, 2);
        assert!(summary.is_clean());
    }

    #[tokio::test]
    async fn run_skips_seen_jobs() {
        let mut store = MockRecordStore::default();
        store.seen.insert("a".to_string());

        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a", "b"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            store,
            Some(MockNotifier),
        );

        let summary = pipeline
            .run(IngestOptions::default(), IngestCallbacks::default())
            .await
            .unwrap();

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.completed, 1);
    }

    #[tokio::test]
    async fn run_honors_limit() {
        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a", "b", "c"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            MockRecordStore::default(),
            Some(MockNotifier),
        );

        let summary = pipeline
            .run(
                IngestOptions {
                    limit: Some(2),
                    ..Default::default()
                },
                IngestCallbacks::default(),
            )
            .await
            .unwrap();

        assert_eq!(summary.completed, 2);
    }

    #[tokio::test]
    async fn dry_run_lists_without_processing() {
        let store = MockRecordStore::default();
        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a", "b"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            store,
            Some(MockNotifier),
        );

        let summary = pipeline
            .run(
                IngestOptions {
                    dry_run: true,
                    ..Default::default()
                },
                IngestCallbacks::default(),
            )
            .await
            .unwrap();

        assert_eq!(summary.pending, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(summary.completed, 0);
    }

    #[tokio::test]
    async fn record_cap_stops_the_run() {
        let mut store = MockRecordStore::default();
        store.seen.insert("old".to_string());

        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            store,
            Some(MockNotifier),
        );

        let summary = pipeline
            .run(
                IngestOptions {
                    max_records: Some(1),
                    ..Default::default()
                },
                IngestCallbacks::default(),
            )
            .await
            .unwrap();

        assert_eq!(summary.capped_at, Some(1));
        assert_eq!(summary.discovered, 0);
        assert_eq!(summary.completed, 0);
    }

    #[tokio::test]
    async fn missing_notifier_skips_notify_stage() {
        let store = MockRecordStore::default();
        let pipeline = IngestPipeline::new(
            MockSource {
                listing: listing(&["a"]),
            },
            MockObjectStore,
            MockTranscriber,
            MockSummarizer,
            store.clone(),
            None::<MockNotifier>,
        );

        let summary = pipeline
            .run(IngestOptions::default(), IngestCallbacks::default())
            .await
            .unwrap();

        assert_eq!(summary.completed, 1);
        assert!(summary.is_clean());
        // stored, transcript-only, and full-transcript writes; no callback write
        assert_eq!(*store.upserts.lock().unwrap(), 3);
    }

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::Fetch.label(), "fetch");
        assert_eq!(Stage::Store.label(), "store");
        assert_eq!(Stage::Notify.to_string(), "notify");
    }

    #[test]
    fn stage_error_maps_to_stage() {
        let error = StageError::from(TranscriptionError::EmptyTranscript);
        assert_eq!(error.stage(), Stage::Transcribe);

        let error = StageError::from(PersistenceError::Unauthorized);
        assert_eq!(error.stage(), Stage::Persist);

        let error = StageError::from(CallbackError::RequestFailed("down".to_string()));
        assert_eq!(error.stage(), Stage::Notify);
    }
}
