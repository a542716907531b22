//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the recordings API, Supabase, OpenAI, and the
//! callback endpoint.

pub mod callback;
pub mod config;
pub mod record_store;
pub mod source;
pub mod storage;
pub mod summarization;
pub mod transcription;

// Re-export adapters
pub use callback::HttpCallbackNotifier;
pub use config::XdgConfigStore;
pub use record_store::SupabaseRecordStore;
pub use source::HttpRecordingSource;
pub use storage::SupabaseObjectStore;
pub use summarization::OpenAiSummarizer;
pub use transcription::OpenAiTranscriber;
