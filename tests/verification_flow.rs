//! End-to-end purchase verification against a scripted transport and an
//! on-disk encrypted store.

use async_trait::async_trait;
use itchwarden::crypto::PassphraseCipher;
use itchwarden::{
    Credentials, FileStore, HttpResponse, HttpTransport, ItchClient, ItchConfig, ItchError,
    ItchEvent, KeyValueStore, VerificationCache,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const STORAGE_KEY: &str = "itch_verification_data.dat";

/// Serves canned responses and counts calls.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn with(responses: Vec<(u16, &str)>) -> Arc<Self> {
        let transport = Self::default();
        transport.responses.lock().unwrap().extend(
            responses
                .into_iter()
                .map(|(status, body)| HttpResponse::new(status, body)),
        );
        Arc::new(transport)
    }

    fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, ItchError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ItchError::TransportError("script exhausted".to_string()))
    }
}

fn open_cache(dir: &TempDir) -> VerificationCache {
    let store = FileStore::with_path(dir.path().to_path_buf()).unwrap();
    let cipher = Arc::new(PassphraseCipher::new("integration-passphrase").unwrap());
    VerificationCache::new(store, cipher, STORAGE_KEY)
}

fn client(dir: &TempDir, transport: Arc<ScriptedTransport>) -> ItchClient {
    let config = ItchConfig::new(Credentials::new("XYZ", "abc"));
    ItchClient::with_parts(config, transport, open_cache(dir)).unwrap()
}

#[tokio::test]
async fn verified_key_survives_restart_without_network() {
    let dir = TempDir::new().unwrap();

    let first = ScriptedTransport::with(vec![(200, r#"{"download_key":{"id":1,"owner":{"id":9}}}"#)]);
    let client_a = client(&dir, first.clone());
    let check = client_a.verify_purchase("KEY-1").await.unwrap();
    assert!(check.verified);
    assert!(!check.from_cache);
    assert_eq!(first.calls(), 1);
    client_a.shutdown().await.unwrap();
    drop(client_a);

    // Fresh process: empty script, so any network call would fail
    let second = ScriptedTransport::with(vec![]);
    let client_b = client(&dir, second.clone());
    let mut events = client_b.subscribe();

    let check = client_b.verify_purchase("KEY-1").await.unwrap();

    assert!(check.verified);
    assert!(check.from_cache);
    assert_eq!(second.calls(), 0);
    let data = check.result.data().unwrap();
    assert_eq!(data["download_key"]["owner"]["id"], 9);
    assert!(data["timestamp"].is_i64());
    assert!(matches!(
        events.try_recv().unwrap(),
        ItchEvent::VerifyPurchaseResult { is_verified: true, .. }
    ));
}

#[tokio::test]
async fn store_on_disk_is_encrypted() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::with(vec![(200, r#"{"download_key":{"id":1}}"#)]);
    let client = client(&dir, transport);

    client.verify_purchase("VISIBLE-KEY").await.unwrap();

    let store = FileStore::with_path(dir.path().to_path_buf()).unwrap();
    let bytes = store.get(STORAGE_KEY).unwrap().unwrap();
    assert!(!bytes.windows(11).any(|w| w == b"VISIBLE-KEY"));
    assert!(!bytes.windows(13).any(|w| w == b"verifications"));
}

#[tokio::test]
async fn unverified_key_is_rechecked_every_time() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::with(vec![
        (200, r#"{"errors":["invalid download key"]}"#),
        (200, r#"{"download_key":{"id":2}}"#),
    ]);
    let client = client(&dir, transport.clone());

    let first = client.verify_purchase("KEY-2").await.unwrap();
    assert!(!first.verified);

    let second = client.verify_purchase("KEY-2").await.unwrap();
    assert!(second.verified);
    assert_eq!(transport.calls(), 2);
    assert!(client.is_verified("KEY-2").await);
}

#[tokio::test]
async fn http_error_leaves_cache_untouched() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::with(vec![(404, r#"{"errors":["not found"]}"#)]);
    let client = client(&dir, transport);

    let check = client.verify_purchase("KEY-3").await.unwrap();

    assert!(!check.verified);
    assert_eq!(check.result.error_message(), Some("HTTP Error: 404"));
    assert!(!client.is_verified("KEY-3").await);
    assert!(client.verification_data("KEY-3").await.is_empty());
}

#[tokio::test]
async fn cleared_key_goes_back_to_the_network() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::with(vec![
        (200, r#"{"download_key":{"id":4}}"#),
        (200, r#"{"download_key":{"id":4}}"#),
    ]);
    let client = client(&dir, transport.clone());

    client.verify_purchase("KEY-4").await.unwrap();
    client.clear_all_verifications().await;
    let check = client.verify_purchase("KEY-4").await.unwrap();

    assert!(!check.from_cache);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn purchases_url_falls_back_to_configured_game() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::with(vec![(200, r#"{"purchases":[]}"#)]);
    let client = client(&dir, transport.clone());

    let result = client.get_game_purchases("").await.unwrap();

    assert!(result.is_success());
    assert_eq!(
        transport.urls.lock().unwrap()[0],
        "https://itch.io/api/1/XYZ/game/abc/purchases"
    );
}
