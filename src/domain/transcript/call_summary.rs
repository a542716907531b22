//! Call summary and transcript data value objects

use serde::{Deserialize, Serialize};

/// Structured data extracted from a call transcript by the summarization
/// model. The field set is fixed; fields the model could not populate are
/// `None` and serialize as explicit `null`, never omitted.
///
/// JSON keys match the summarization model's output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSummary {
    #[serde(rename = "Configuration")]
    pub configuration: Option<String>,

    /// Carpet area range across configurations (e.g. "750-1000")
    #[serde(rename = "Size_Range")]
    pub size_range: Option<String>,

    /// Base selling price per square foot
    #[serde(rename = "BSP")]
    pub bsp: Option<String>,

    #[serde(rename = "Total_Units")]
    pub total_units: Option<String>,

    #[serde(rename = "Units_available")]
    pub units_available: Option<String>,

    #[serde(rename = "Completion_Date")]
    pub completion_date: Option<String>,

    #[serde(rename = "Additional_Notes")]
    pub additional_notes: Option<String>,

    /// Call outcome label (e.g. "Successful", "Call back", "Voicemail")
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

impl CallSummary {
    /// Replace empty or whitespace-only values with `None`.
    /// The model is instructed to return strings for every field, so an
    /// unanswered field often comes back as `""` rather than `null`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        Self {
            configuration: clean(self.configuration),
            size_range: clean(self.size_range),
            bsp: clean(self.bsp),
            total_units: clean(self.total_units),
            units_available: clean(self.units_available),
            completion_date: clean(self.completion_date),
            additional_notes: clean(self.additional_notes),
            notes: clean(self.notes),
        }
    }
}

/// The summarization model wraps its answer in a `dto` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    pub dto: CallSummary,
}

/// The value persisted in the record store's `transcriptData` column and sent
/// to the callback endpoint: transcript text plus the flattened summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptData {
    pub text: String,

    #[serde(flatten)]
    pub summary: CallSummary,
}

impl TranscriptData {
    /// Transcript with a populated summary
    pub fn new(text: impl Into<String>, summary: CallSummary) -> Self {
        Self {
            text: text.into(),
            summary,
        }
    }

    /// Transcript persisted before summarization: all summary fields null
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            summary: CallSummary::default(),
        }
    }
}
