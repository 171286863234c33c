//! Itchwarden configuration.

use crate::ItchError;
use std::time::Duration;

/// The only OAuth scope itch.io grants to third-party applications.
pub const OAUTH_SCOPE: &str = "profile:me";

/// Default itch.io server-side API root.
pub const DEFAULT_API_BASE: &str = "https://itch.io/api/1";

/// Default User-Agent sent with every API request.
pub const DEFAULT_USER_AGENT: &str = "GodotItch/1.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default storage key of the verification store.
pub const DEFAULT_STORAGE_KEY: &str = "itch_verification_data.dat";

/// Placeholder passphrase for the verification store.
///
/// SECURITY: this ships with the binary and protects nothing against a
/// determined user. Supply your own via [`ItchConfig::cache_passphrase`] or a
/// custom [`crate::crypto::Cipher`].
pub const DEFAULT_CACHE_PASSPHRASE: &str = "ItchDataStore_2025_SecureKey";

/// itch.io credentials and OAuth settings.
///
/// Setters replace the whole field. No validation happens here beyond the
/// OAuth scope coercion in [`Credentials::oauth_scope`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    game_id: String,
    oauth_client_id: String,
    oauth_redirect_uri: String,
    oauth_scope: String,
}

impl Credentials {
    /// Create credentials with an API key and default game id.
    pub fn new(api_key: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            game_id: game_id.into(),
            ..Self::default()
        }
    }

    /// Read credentials from `ITCH_API_KEY`, `ITCH_GAME_ID`,
    /// `ITCH_OAUTH_CLIENT_ID`, `ITCH_OAUTH_REDIRECT_URI` and `ITCH_OAUTH_SCOPE`.
    ///
    /// Unset variables become empty strings.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            api_key: var("ITCH_API_KEY"),
            game_id: var("ITCH_GAME_ID"),
            oauth_client_id: var("ITCH_OAUTH_CLIENT_ID"),
            oauth_redirect_uri: var("ITCH_OAUTH_REDIRECT_URI"),
            oauth_scope: var("ITCH_OAUTH_SCOPE"),
        }
    }

    /// itch.io API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Default game id used when an operation receives an empty one.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// OAuth application client id.
    pub fn oauth_client_id(&self) -> &str {
        &self.oauth_client_id
    }

    /// OAuth redirect URI registered with the application.
    pub fn oauth_redirect_uri(&self) -> &str {
        &self.oauth_redirect_uri
    }

    /// OAuth scope. Always `profile:me`, whatever was stored.
    pub fn oauth_scope(&self) -> &str {
        if !self.oauth_scope.is_empty() && self.oauth_scope != OAUTH_SCOPE {
            tracing::debug!(stored = %self.oauth_scope, "Coercing OAuth scope to {}", OAUTH_SCOPE);
        }
        OAUTH_SCOPE
    }

    /// Replace the API key.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Replace the default game id.
    pub fn set_game_id(&mut self, game_id: impl Into<String>) {
        self.game_id = game_id.into();
    }

    /// Replace the OAuth client id.
    pub fn set_oauth_client_id(&mut self, client_id: impl Into<String>) {
        self.oauth_client_id = client_id.into();
    }

    /// Replace the OAuth redirect URI.
    pub fn set_oauth_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.oauth_redirect_uri = redirect_uri.into();
    }

    /// Replace the stored OAuth scope. Reads still return `profile:me`.
    pub fn set_oauth_scope(&mut self, scope: impl Into<String>) {
        self.oauth_scope = scope.into();
    }
}

/// Configuration for an [`crate::ItchClient`].
#[derive(Debug, Clone)]
pub struct ItchConfig {
    /// API key, game id and OAuth settings.
    pub credentials: Credentials,

    /// API root, without trailing slash (e.g. `https://itch.io/api/1`).
    pub api_base: String,

    /// User-Agent header value.
    pub user_agent: String,

    /// Upper bound on a single request's lifetime.
    pub timeout: Duration,

    /// Key under which the verification store is persisted.
    pub storage_key: String,

    /// Passphrase the verification store is encrypted with.
    pub cache_passphrase: String,
}

impl ItchConfig {
    /// Create a configuration with defaults around the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cache_passphrase: DEFAULT_CACHE_PASSPHRASE.to_string(),
        }
    }

    /// Configuration with credentials read from the environment.
    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    /// Validate configuration for obvious errors.
    ///
    /// Credentials are not checked here: a missing API key is reported per
    /// operation so it can be supplied later.
    pub fn validate(&self) -> Result<(), ItchError> {
        if self.api_base.is_empty() {
            return Err(ItchError::ConfigError(
                "api_base cannot be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ItchError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(ItchError::ConfigError(
                "storage_key cannot be empty".to_string(),
            ));
        }
        if self.cache_passphrase.is_empty() {
            return Err(ItchError::ConfigError(
                "cache_passphrase cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ItchConfig {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}
