//! Request bookkeeping, API results and response classification.

use crate::ItchError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A JSON object, the shape every successful API result is normalized to.
pub type JsonObject = Map<String, Value>;

/// Reserved key naming the operation that produced a response.
pub const REQUEST_TYPE_KEY: &str = "_request_type";

/// Reserved key carrying the request context (game id, download key).
pub const REQUEST_DATA_KEY: &str = "_request_data";

/// Key non-object JSON bodies are wrapped under.
pub const RESULT_KEY: &str = "result";

/// The operation an API call was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// `GET /me`
    GetMe,
    /// `GET /my-games`
    GetMyGames,
    /// `GET /game/{id}/purchases`
    GetGamePurchases,
    /// `GET /game/{id}/uploads`
    GetGameUploads,
    /// `GET /game/{id}/download_keys`
    GetDownloadKey,
    /// `GET /game/{id}/download_keys`, feeding the verification cache.
    VerifyDownloadKey,
    /// `GET /user/{username}`
    GetUser,
}

impl RequestType {
    /// Wire name used as the result endpoint and in `_request_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetMe => "get_me",
            Self::GetMyGames => "get_my_games",
            Self::GetGamePurchases => "get_game_purchases",
            Self::GetGameUploads => "get_game_uploads",
            Self::GetDownloadKey => "get_download_key",
            Self::VerifyDownloadKey => "verify_download_key",
            Self::GetUser => "get_user",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one in-flight call so its response can be attributed and enriched.
///
/// Every call owns its own `PendingRequest`; overlapping calls on one client
/// never share or overwrite each other's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Client-unique, increasing request id.
    pub id: u64,

    /// Operation that issued the request.
    pub request_type: RequestType,

    /// Parameters worth echoing back to the caller.
    pub context: BTreeMap<String, String>,
}

impl PendingRequest {
    /// Create a pending request without context.
    pub fn new(id: u64, request_type: RequestType) -> Self {
        Self {
            id,
            request_type,
            context: BTreeMap::new(),
        }
    }

    /// Attach a context entry.
    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Context as a JSON object.
    pub fn context_object(&self) -> JsonObject {
        self.context
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

/// Outcome of an API call once the HTTP exchange completed.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// Status 200 with a JSON body.
    Success {
        /// Wire name of the originating operation.
        endpoint: String,
        /// Response object, with `_request_type` / `_request_data` added.
        data: JsonObject,
    },
    /// Non-200 status, unparseable body or transport failure.
    Error {
        /// Wire name of the originating operation.
        endpoint: String,
        /// Human-readable reason.
        message: String,
        /// HTTP status, 0 when no response was received.
        http_status: u16,
    },
}

impl ApiResult {
    /// Wire name of the originating operation.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Success { endpoint, .. } | Self::Error { endpoint, .. } => endpoint,
        }
    }

    /// Whether this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Response data on success.
    pub fn data(&self) -> Option<&JsonObject> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// Error message on failure.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message, .. } => Some(message),
        }
    }

    /// Result for a request that never got a response (connect error, timeout).
    pub fn transport_failure(request: &PendingRequest, reason: &str) -> Self {
        Self::Error {
            endpoint: request.request_type.as_str().to_string(),
            message: format!("Request failed: {}", reason),
            http_status: 0,
        }
    }
}

/// Result of [`crate::ItchClient::verify_purchase`].
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseCheck {
    /// Whether the download key is a confirmed purchase.
    pub verified: bool,

    /// Whether the answer came from the local cache without a network call.
    pub from_cache: bool,

    /// The underlying API result (cached metadata on a cache hit).
    pub result: ApiResult,
}

/// Classify a completed HTTP exchange.
///
/// 1. Any status other than exactly 200 is an error, including other 2xx codes.
/// 2. A body that is not JSON (or is JSON `null`) is an error.
/// 3. Non-object JSON is wrapped as `{"result": <value>}`.
/// 4. The object gets `_request_type` and, with a non-empty context, `_request_data`.
pub fn classify_response(request: &PendingRequest, status: u16, body: &[u8]) -> ApiResult {
    let endpoint = request.request_type.as_str().to_string();

    if status != 200 {
        return ApiResult::Error {
            endpoint,
            message: format!("HTTP Error: {}", status),
            http_status: status,
        };
    }

    let parsed = match parse_body(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(request_id = request.id, error = %e, "Response body rejected");
            return ApiResult::Error {
                endpoint,
                message: "Failed to parse JSON response".to_string(),
                http_status: status,
            };
        }
    };

    let mut data = match parsed {
        Value::Object(object) => object,
        other => {
            let mut wrapped = JsonObject::new();
            wrapped.insert(RESULT_KEY.to_string(), other);
            wrapped
        }
    };

    data.insert(REQUEST_TYPE_KEY.to_string(), Value::from(request.request_type.as_str()));
    if !request.context.is_empty() {
        data.insert(REQUEST_DATA_KEY.to_string(), Value::Object(request.context_object()));
    }

    ApiResult::Success { endpoint, data }
}

/// Parse a response body as JSON.
///
/// Invalid JSON and a bare `null` are both [`ItchError::MalformedResponse`].
pub fn parse_body(body: &[u8]) -> Result<Value, ItchError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Err(ItchError::MalformedResponse("body is JSON null".to_string())),
        Ok(value) => Ok(value),
        Err(e) => Err(ItchError::MalformedResponse(e.to_string())),
    }
}

/// Decide whether a download-key response proves a purchase.
///
/// A `download_key` object means verified; otherwise any `result` key does.
pub fn derive_verification(data: &JsonObject) -> bool {
    if matches!(data.get("download_key"), Some(Value::Object(_))) {
        return true;
    }
    data.contains_key(RESULT_KEY)
}
