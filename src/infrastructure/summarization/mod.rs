//! Summarization adapters

mod openai;

pub use openai::OpenAiSummarizer;
