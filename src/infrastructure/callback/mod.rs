//! Callback notifier adapters

mod http;

pub use http::HttpCallbackNotifier;
