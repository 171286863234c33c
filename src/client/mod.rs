//! HTTP client layer.

pub mod http;

pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
