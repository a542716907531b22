//! Record store row patch and callback payload value objects

use serde::Serialize;

use crate::domain::recording::RecordingDescriptor;
use crate::domain::transcript::TranscriptData;

/// A partial row for the record store upsert, keyed by `file_id`.
///
/// `None` fields are omitted from the serialized patch so repeated upserts
/// merge into the existing row instead of clearing columns that were
/// populated by an earlier stage.
#[derive(Debug, Clone, Serialize)]
pub struct RecordPatch {
    pub file_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,

    /// Signed reference URL of the stored audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<String>,

    #[serde(rename = "transcriptData", skip_serializing_if = "Option::is_none")]
    pub transcript_data: Option<TranscriptData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_response: Option<String>,
}

impl RecordPatch {
    fn bare(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            project_id: None,
            file_extension: None,
            recording: None,
            transcript_data: None,
            callback_response: None,
        }
    }

    /// Patch written after the audio upload: listing metadata plus the
    /// storage reference
    pub fn stored(descriptor: &RecordingDescriptor, recording: impl Into<String>) -> Self {
        Self {
            project_id: descriptor.project_id().map(str::to_string),
            file_extension: Some(descriptor.file_extension().to_string()),
            recording: Some(recording.into()),
            ..Self::bare(descriptor.file_id())
        }
    }

    /// Patch written after transcription or summarization
    pub fn transcript(file_id: impl Into<String>, transcript_data: TranscriptData) -> Self {
        Self {
            transcript_data: Some(transcript_data),
            ..Self::bare(file_id)
        }
    }

    /// Patch written after the callback completed
    pub fn callback(file_id: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            callback_response: Some(response.into()),
            ..Self::bare(file_id)
        }
    }
}

/// Payload POSTed to the callback endpoint after a job completes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub file_id: String,
    pub project_id: Option<String>,
    pub transcript_data: TranscriptData,
    /// "1" marks a successfully transcribed recording
    pub status: String,
}

impl CallbackPayload {
    /// Build the success payload for a completed job
    pub fn completed(descriptor: &RecordingDescriptor, transcript_data: TranscriptData) -> Self {
        Self {
            file_id: descriptor.file_id().to_string(),
            project_id: descriptor.project_id().map(str::to_string),
            transcript_data,
            status: "1".to_string(),
        }
    }
}
