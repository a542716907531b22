//! Recording source adapters

mod http;

pub use http::HttpRecordingSource;
