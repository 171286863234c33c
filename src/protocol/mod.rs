//! itch.io protocol: endpoints, request bookkeeping and response handling.

pub mod endpoints;
pub mod models;

pub use endpoints::{build_api_url, Endpoint};
pub use models::{ApiResult, JsonObject, PendingRequest, PurchaseCheck, RequestType};
