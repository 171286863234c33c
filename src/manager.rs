//! Itch client - the main public API for Itchwarden.
//!
//! The `ItchClient` provides:
//! - itch.io server-side API calls (`me`, `my-games`, purchases, uploads, download keys)
//! - Purchase verification backed by the encrypted local cache
//! - OAuth authorization URL helpers
//! - Result notifications on a broadcast channel

use crate::cache::VerificationCache;
use crate::client::http::{HttpTransport, ReqwestTransport};
use crate::config::{Credentials, ItchConfig};
use crate::events::{EventBus, ItchEvent};
use crate::oauth;
use crate::protocol::endpoints::{build_api_url, Endpoint};
use crate::protocol::models::{
    classify_response, derive_verification, ApiResult, JsonObject, PendingRequest, PurchaseCheck,
    RequestType,
};
use crate::ItchError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// Namespace of the verification store under the user data directory.
pub const DEFAULT_NAMESPACE: &str = "itchwarden";

/// Main itch.io client.
///
/// Create one instance per application and share it by reference. All API
/// operations are async and return in two layers:
/// - `Err(ItchError)` for precondition failures (client shut down, missing API
///   key or parameter), detected before any I/O and never published as events
/// - `Ok(ApiResult)` once the HTTP exchange finished, whether it succeeded or not
///
/// Each call carries its own request id, so overlapping calls are attributed
/// correctly in results and events.
pub struct ItchClient {
    config: ItchConfig,
    transport: Arc<dyn HttpTransport>,
    cache: Mutex<VerificationCache>,
    events: EventBus,
    next_request_id: AtomicU64,
    ready: AtomicBool,
}

impl ItchClient {
    /// Create a client using reqwest and the per-user encrypted cache.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Configuration validation fails
    /// - HTTP client creation fails
    /// - The cache directory cannot be created
    pub fn new(config: ItchConfig) -> Result<Self, ItchError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        let cache = VerificationCache::open(DEFAULT_NAMESPACE, &config)?;
        Self::with_parts(config, Arc::new(transport), cache)
    }

    /// Create a client from explicit parts (custom transport or cache backend).
    pub fn with_parts(
        config: ItchConfig,
        transport: Arc<dyn HttpTransport>,
        cache: VerificationCache,
    ) -> Result<Self, ItchError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            cache: Mutex::new(cache),
            events: EventBus::default(),
            next_request_id: AtomicU64::new(0),
            ready: AtomicBool::new(true),
        })
    }

    /// Crate version.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ItchConfig {
        &self.config
    }

    /// Current credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.config.credentials
    }

    /// Mutable access to the credentials.
    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.config.credentials
    }

    /// Replace the API key.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.credentials.set_api_key(api_key);
    }

    /// Replace the default game id.
    pub fn set_game_id(&mut self, game_id: impl Into<String>) {
        self.config.credentials.set_game_id(game_id);
    }

    /// Subscribe to result notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ItchEvent> {
        self.events.subscribe()
    }

    /// Whether the client accepts requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Stop accepting requests and flush the verification cache.
    ///
    /// Later operations fail with [`ItchError::NotReady`].
    pub async fn shutdown(&self) -> Result<(), ItchError> {
        self.ready.store(false, Ordering::SeqCst);
        self.cache.lock().await.flush()
    }

    /// Profile of the API key's owner.
    pub async fn get_me(&self) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        let url = self.api_url(&Endpoint::Me)?;
        let request = self.next_request(RequestType::GetMe);
        Ok(self.execute(request, &url).await)
    }

    /// Games owned by the API key's owner.
    pub async fn get_my_games(&self) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        let url = self.api_url(&Endpoint::MyGames)?;
        let request = self.next_request(RequestType::GetMyGames);
        Ok(self.execute(request, &url).await)
    }

    /// Purchases of a game. An empty `game_id` uses the configured one.
    pub async fn get_game_purchases(&self, game_id: &str) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        self.require_api_key()?;
        let game_id = self.resolve_game_id(game_id)?;
        let url = self.api_url(&Endpoint::GamePurchases { game_id: &game_id })?;
        let request = self
            .next_request(RequestType::GetGamePurchases)
            .with_context("game_id", game_id);
        Ok(self.execute(request, &url).await)
    }

    /// Uploads of a game. An empty `game_id` uses the configured one.
    pub async fn get_game_uploads(&self, game_id: &str) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        self.require_api_key()?;
        let game_id = self.resolve_game_id(game_id)?;
        let url = self.api_url(&Endpoint::GameUploads { game_id: &game_id })?;
        let request = self
            .next_request(RequestType::GetGameUploads)
            .with_context("game_id", game_id);
        Ok(self.execute(request, &url).await)
    }

    /// Look up a download key. An empty `game_id` uses the configured one.
    pub async fn get_download_key(&self, download_key: &str, game_id: &str) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        self.require_api_key()?;
        require_param("download_key", download_key)?;
        let game_id = self.resolve_game_id(game_id)?;
        let url = self.api_url(&Endpoint::DownloadKeys {
            game_id: &game_id,
            download_key,
        })?;
        let request = self
            .next_request(RequestType::GetDownloadKey)
            .with_context("download_key", download_key)
            .with_context("game_id", game_id);
        Ok(self.execute(request, &url).await)
    }

    /// Public profile of a user.
    pub async fn get_user(&self, username: &str) -> Result<ApiResult, ItchError> {
        self.ensure_ready()?;
        self.require_api_key()?;
        require_param("username", username)?;
        let url = self.api_url(&Endpoint::User { username })?;
        let request = self
            .next_request(RequestType::GetUser)
            .with_context("username", username);
        Ok(self.execute(request, &url).await)
    }

    /// Verify that `download_key` belongs to a purchase of the configured game.
    ///
    /// A key already verified in the cache is answered locally without any
    /// network call. Otherwise the download key endpoint is queried and a
    /// verified outcome is written to the cache. Publishes
    /// [`ItchEvent::VerifyPurchaseResult`] unless the request failed.
    pub async fn verify_purchase(&self, download_key: &str) -> Result<PurchaseCheck, ItchError> {
        self.ensure_ready()?;
        require_param("download_key", download_key)?;

        if let Some(cached) = self.cached_verification(download_key).await {
            tracing::debug!("Download key already verified, answering from cache");
            self.events.publish(ItchEvent::VerifyPurchaseResult {
                is_verified: true,
                data: cached.clone(),
            });
            return Ok(PurchaseCheck {
                verified: true,
                from_cache: true,
                result: ApiResult::Success {
                    endpoint: RequestType::VerifyDownloadKey.as_str().to_string(),
                    data: cached,
                },
            });
        }

        self.require_api_key()?;
        let game_id = self.resolve_game_id("")?;
        let url = self.api_url(&Endpoint::DownloadKeys {
            game_id: &game_id,
            download_key,
        })?;
        let request = self
            .next_request(RequestType::VerifyDownloadKey)
            .with_context("download_key", download_key)
            .with_context("game_id", game_id);

        let result = self.execute(request, &url).await;
        if !result.is_success() {
            return Ok(PurchaseCheck {
                verified: false,
                from_cache: false,
                result,
            });
        }

        let data = result.data().cloned().unwrap_or_default();
        let verified = derive_verification(&data);
        if verified {
            self.cache.lock().await.set_verified(download_key, true, &data);
        }
        tracing::debug!(verified, "Purchase verification completed");

        self.events.publish(ItchEvent::VerifyPurchaseResult {
            is_verified: verified,
            data,
        });

        Ok(PurchaseCheck {
            verified,
            from_cache: false,
            result,
        })
    }

    /// Whether the cache holds a verified record for `download_key`.
    pub async fn is_verified(&self, download_key: &str) -> bool {
        self.cache.lock().await.is_verified(download_key)
    }

    /// Cached metadata for `download_key`, or an empty object.
    pub async fn verification_data(&self, download_key: &str) -> JsonObject {
        self.cache.lock().await.get_verification_data(download_key)
    }

    /// Forget the cached verification of `download_key`.
    pub async fn clear_verification(&self, download_key: &str) {
        self.cache.lock().await.clear_verification(download_key);
    }

    /// Forget every cached verification.
    pub async fn clear_all_verifications(&self) {
        self.cache.lock().await.clear_all_data();
    }

    /// OAuth authorization URL; empty arguments fall back to the credentials.
    pub fn build_oauth_authorize_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        state: &str,
    ) -> Result<String, ItchError> {
        oauth::build_authorize_url(self.credentials(), client_id, redirect_uri, state)
    }

    /// Open the OAuth authorization URL in the system browser.
    pub fn start_oauth_authorization(
        &self,
        client_id: &str,
        redirect_uri: &str,
        state: &str,
    ) -> Result<String, ItchError> {
        oauth::start_authorization(self.credentials(), client_id, redirect_uri, state)
    }

    fn ensure_ready(&self) -> Result<(), ItchError> {
        if !self.is_ready() {
            tracing::error!("itch client used after shutdown");
            return Err(ItchError::NotReady);
        }
        Ok(())
    }

    fn require_api_key(&self) -> Result<(), ItchError> {
        if self.credentials().api_key().is_empty() {
            tracing::error!("itch.io API key not set");
            return Err(ItchError::MissingApiKey);
        }
        Ok(())
    }

    fn resolve_game_id(&self, game_id: &str) -> Result<String, ItchError> {
        let game_id = if game_id.is_empty() {
            self.credentials().game_id()
        } else {
            game_id
        };
        require_param("game_id", game_id)?;
        Ok(game_id.to_string())
    }

    fn api_url(&self, endpoint: &Endpoint<'_>) -> Result<String, ItchError> {
        build_api_url(&self.config.api_base, self.credentials().api_key(), endpoint)
    }

    fn next_request(&self, request_type: RequestType) -> PendingRequest {
        let id = self.next_request_id.fetch_add(1, Ordering::SeqCst) + 1;
        PendingRequest::new(id, request_type)
    }

    async fn cached_verification(&self, download_key: &str) -> Option<JsonObject> {
        let mut cache = self.cache.lock().await;
        if cache.is_verified(download_key) {
            Some(cache.get_verification_data(download_key))
        } else {
            None
        }
    }

    /// Send the request, classify the outcome and publish the generic event.
    async fn execute(&self, request: PendingRequest, url: &str) -> ApiResult {
        // The URL embeds the API key, so it is never logged.
        tracing::debug!(
            request_id = request.id,
            request_type = %request.request_type,
            "Dispatching itch.io request"
        );

        let headers = [("User-Agent", self.config.user_agent.as_str())];
        let result = match self.transport.get(url, &headers).await {
            Ok(response) => classify_response(&request, response.status, &response.body),
            Err(e) => {
                let reason = match e {
                    ItchError::TransportError(reason) => reason,
                    other => other.to_string(),
                };
                tracing::warn!(request_id = request.id, %reason, "itch.io request failed");
                ApiResult::transport_failure(&request, &reason)
            }
        };

        if let ApiResult::Error { message, http_status, .. } = &result {
            tracing::debug!(request_id = request.id, http_status, %message, "itch.io request returned an error");
        }

        self.events.publish(ItchEvent::from_result(request.id, &result));
        result
    }
}

impl Drop for ItchClient {
    fn drop(&mut self) {
        if !self.is_ready() {
            return;
        }
        if let Err(e) = self.cache.get_mut().flush() {
            tracing::error!(error = %e, "Failed to flush verification store on drop");
        }
    }
}

impl std::fmt::Debug for ItchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItchClient")
            .field("api_base", &self.config.api_base)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

fn require_param(name: &'static str, value: &str) -> Result<(), ItchError> {
    if value.is_empty() {
        tracing::error!(parameter = name, "Required parameter missing");
        return Err(ItchError::MissingParameter { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::client::http::MockTransport;
    use crate::clock::MockClock;
    use crate::crypto::PassphraseCipher;
    use serde_json::{json, Value};

    const NOW: i64 = 1_736_942_400;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn cache(store: &MemoryStore) -> VerificationCache {
        VerificationCache::with_clock(
            store.clone(),
            Arc::new(PassphraseCipher::new("test").unwrap()),
            "itch_verification_data.dat",
            Arc::new(MockClock::from_unix(NOW)),
        )
    }

    fn client_with(api_key: &str, game_id: &str) -> (ItchClient, MockTransport, MemoryStore) {
        let transport = MockTransport::new();
        let store = MemoryStore::new();
        let config = ItchConfig::new(Credentials::new(api_key, game_id));
        let client = ItchClient::with_parts(config, Arc::new(transport.clone()), cache(&store)).unwrap();
        (client, transport, store)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ItchConfig {
            api_base: String::new(),
            ..ItchConfig::default()
        };
        assert!(matches!(ItchClient::new(config), Err(ItchError::ConfigError(_))));
    }

    #[test]
    fn test_version() {
        assert_eq!(ItchClient::version(), env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_get_me_sends_user_agent() {
        let (client, transport, _) = client_with("XYZ", "");
        transport.push_response(200, r#"{"user":{"id":1}}"#);

        let result = client.get_me().await.unwrap();

        let data = result.data().unwrap();
        assert_eq!(data["user"]["id"], 1);
        assert_eq!(data["_request_type"], "get_me");
        assert!(data.get("_request_data").is_none());

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://itch.io/api/1/XYZ/me");
        assert_eq!(
            requests[0].headers,
            vec![("User-Agent".to_string(), "GodotItch/1.0".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_issues_no_request() {
        let (client, transport, _) = client_with("", "abc");
        let mut events = client.subscribe();

        assert!(matches!(client.get_me().await, Err(ItchError::MissingApiKey)));
        assert!(matches!(client.get_my_games().await, Err(ItchError::MissingApiKey)));
        assert!(matches!(client.get_game_purchases("").await, Err(ItchError::MissingApiKey)));

        assert!(transport.requests().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_game_purchases_uses_stored_game_id() {
        let (client, transport, _) = client_with("XYZ", "abc");
        transport.push_response(200, r#"{"purchases":[]}"#);

        let result = client.get_game_purchases("").await.unwrap();

        assert_eq!(transport.requests()[0].url, "https://itch.io/api/1/XYZ/game/abc/purchases");
        assert_eq!(result.data().unwrap()["_request_data"], json!({"game_id": "abc"}));
    }

    #[tokio::test]
    async fn test_game_purchases_without_any_game_id() {
        let (client, transport, _) = client_with("XYZ", "");

        let result = client.get_game_purchases("").await;

        assert!(matches!(result, Err(ItchError::MissingParameter { name: "game_id" })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_game_uploads_explicit_game_id_wins() {
        let (client, transport, _) = client_with("XYZ", "abc");
        transport.push_response(200, r#"{"uploads":[]}"#);

        client.get_game_uploads("999").await.unwrap();

        assert_eq!(transport.requests()[0].url, "https://itch.io/api/1/XYZ/game/999/uploads");
    }

    #[tokio::test]
    async fn test_get_download_key_requires_key() {
        let (client, transport, _) = client_with("XYZ", "abc");
        let result = client.get_download_key("", "").await;
        assert!(matches!(result, Err(ItchError::MissingParameter { name: "download_key" })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_download_key_context_uses_resolved_game_id() {
        let (client, transport, _) = client_with("XYZ", "abc");
        transport.push_response(200, r#"{"download_key":{"id":5}}"#);

        let result = client.get_download_key("KEY", "").await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://itch.io/api/1/XYZ/game/abc/download_keys?download_key=KEY"
        );
        assert_eq!(
            result.data().unwrap()["_request_data"],
            json!({"download_key": "KEY", "game_id": "abc"})
        );
    }

    #[tokio::test]
    async fn test_get_user() {
        let (client, transport, _) = client_with("XYZ", "");
        transport.push_response(200, r#"{"user":{"username":"leafo"}}"#);

        let result = client.get_user("leafo").await.unwrap();

        assert_eq!(transport.requests()[0].url, "https://itch.io/api/1/XYZ/user/leafo");
        assert_eq!(result.endpoint(), "get_user");
    }

    #[tokio::test]
    async fn test_http_error_is_published() {
        let (client, transport, _) = client_with("XYZ", "");
        let mut events = client.subscribe();
        transport.push_response(500, "boom");

        let result = client.get_me().await.unwrap();

        assert_eq!(result.error_message(), Some("HTTP Error: 500"));
        assert_eq!(
            events.try_recv().unwrap(),
            ItchEvent::ApiError {
                request_id: 1,
                endpoint: "get_me".to_string(),
                message: "HTTP Error: 500".to_string(),
                http_status: 500,
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_result() {
        let (client, transport, _) = client_with("XYZ", "");
        transport.push_failure("timed out after 10s");

        let result = client.get_me().await.unwrap();

        assert_eq!(
            result,
            ApiResult::Error {
                endpoint: "get_me".to_string(),
                message: "Request failed: timed out after 10s".to_string(),
                http_status: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_array_body_wrapped() {
        let (client, transport, _) = client_with("XYZ", "");
        transport.push_response(200, "[1,2,3]");

        let result = client.get_my_games().await.unwrap();

        assert_eq!(
            result.data().unwrap(),
            &object(json!({"result": [1, 2, 3], "_request_type": "get_my_games"}))
        );
    }

    #[tokio::test]
    async fn test_verify_purchase_success_is_cached() {
        let (client, transport, store) = client_with("XYZ", "abc");
        let mut events = client.subscribe();
        transport.push_response(200, r#"{"download_key":{"id":1}}"#);

        let check = client.verify_purchase("KEY").await.unwrap();

        assert!(check.verified);
        assert!(!check.from_cache);
        assert!(client.is_verified("KEY").await);

        // Generic response first, then the verification outcome
        assert!(matches!(events.try_recv().unwrap(), ItchEvent::ApiResponse { request_id: 1, .. }));
        match events.try_recv().unwrap() {
            ItchEvent::VerifyPurchaseResult { is_verified, data } => {
                assert!(is_verified);
                assert_eq!(data["download_key"]["id"], 1);
                assert_eq!(data["_request_type"], "verify_download_key");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        // Written through to the persisted store
        let mut reopened = cache(&store);
        assert!(reopened.is_verified("KEY"));
        assert_eq!(reopened.get_verification_data("KEY")["timestamp"], NOW);
    }

    #[tokio::test]
    async fn test_verify_purchase_cache_hit_skips_network() {
        let (client, transport, store) = client_with("XYZ", "abc");
        cache(&store).set_verified("KEY", true, &object(json!({"owner": "sam"})));
        let mut events = client.subscribe();

        let check = client.verify_purchase("KEY").await.unwrap();

        assert!(check.verified);
        assert!(check.from_cache);
        assert!(transport.requests().is_empty());
        let expected = object(json!({"owner": "sam", "timestamp": NOW}));
        assert_eq!(check.result.data(), Some(&expected));
        assert_eq!(
            events.try_recv().unwrap(),
            ItchEvent::VerifyPurchaseResult {
                is_verified: true,
                data: expected,
            }
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_verify_purchase_unverified_not_persisted() {
        let (client, transport, store) = client_with("XYZ", "abc");
        transport.push_response(200, r#"{"errors":["no key"]}"#);

        let check = client.verify_purchase("KEY").await.unwrap();

        assert!(!check.verified);
        assert!(check.result.is_success());
        assert!(!client.is_verified("KEY").await);
        assert!(cache(&store).get_record("KEY").is_none());
    }

    #[tokio::test]
    async fn test_verify_purchase_http_error_skips_derivation() {
        let (client, transport, store) = client_with("XYZ", "abc");
        let mut events = client.subscribe();
        transport.push_response(404, r#"{"result":"would verify if derived"}"#);

        let check = client.verify_purchase("KEY").await.unwrap();

        assert!(!check.verified);
        assert!(check.result.error_message().unwrap().contains("404"));
        assert!(matches!(events.try_recv().unwrap(), ItchEvent::ApiError { http_status: 404, .. }));
        assert!(events.try_recv().is_err());
        assert!(cache(&store).get_record("KEY").is_none());
    }

    #[tokio::test]
    async fn test_verify_purchase_requires_key() {
        let (client, _, _) = client_with("XYZ", "abc");
        let result = client.verify_purchase("").await;
        assert!(matches!(result, Err(ItchError::MissingParameter { name: "download_key" })));
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let (client, transport, _) = client_with("XYZ", "");
        let mut events = client.subscribe();
        transport.push_response(200, "{}");
        transport.push_response(200, "{}");

        let (a, b) = tokio::join!(client.get_me(), client.get_my_games());
        assert!(a.unwrap().is_success());
        assert!(b.unwrap().is_success());

        let mut ids = Vec::new();
        while let Ok(ItchEvent::ApiResponse { request_id, .. }) = events.try_recv() {
            ids.push(request_id);
        }
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_further_calls() {
        let (client, transport, _) = client_with("XYZ", "abc");

        client.shutdown().await.unwrap();

        assert!(!client.is_ready());
        assert!(matches!(client.get_me().await, Err(ItchError::NotReady)));
        assert!(matches!(client.verify_purchase("KEY").await, Err(ItchError::NotReady)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clear_verifications() {
        let (client, _, store) = client_with("XYZ", "abc");
        {
            let mut seeded = cache(&store);
            seeded.set_verified("A", true, &JsonObject::new());
            seeded.set_verified("B", true, &JsonObject::new());
        }

        client.clear_verification("A").await;
        assert!(!client.is_verified("A").await);
        assert!(client.is_verified("B").await);

        client.clear_all_verifications().await;
        assert!(!client.is_verified("B").await);
        assert!(client.verification_data("B").await.is_empty());
    }

    #[test]
    fn test_oauth_url_uses_credentials() {
        let (mut client, _, _) = client_with("XYZ", "");
        client.credentials_mut().set_oauth_client_id("cid");
        client.credentials_mut().set_oauth_redirect_uri("http://localhost/cb");

        let url = client.build_oauth_authorize_url("", "", "s1").unwrap();
        assert_eq!(
            url,
            "https://itch.io/user/oauth?client_id=cid&scope=profile%3Ame\
             &redirect_uri=http%3A%2F%2Flocalhost%2Fcb&state=s1"
        );
    }
}
