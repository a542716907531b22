//! Callscribe - call recording transcription and summarization pipeline
//!
//! This crate ingests newly available call recordings from a remote API,
//! stores the audio in Supabase Storage, transcribes and summarizes it via
//! OpenAI, persists results to a Supabase table, and notifies a callback
//! endpoint with the final payload.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core value objects, entities, and errors
//! - **Application**: The ingest pipeline use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (recordings API, Supabase, OpenAI, etc.)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
