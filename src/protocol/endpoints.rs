//! itch.io API endpoint paths and URL construction.

use crate::ItchError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

/// Everything except RFC 3986 unreserved characters gets escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encode a query value (`a b~` becomes `a%20b~`).
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// An itch.io server-side API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Profile of the API key's owner.
    Me,
    /// Games owned by the API key's owner.
    MyGames,
    /// Purchases of a game.
    GamePurchases {
        /// itch.io game id.
        game_id: &'a str,
    },
    /// Uploads of a game.
    GameUploads {
        /// itch.io game id.
        game_id: &'a str,
    },
    /// Lookup of a download key for a game.
    DownloadKeys {
        /// itch.io game id.
        game_id: &'a str,
        /// Download key to look up.
        download_key: &'a str,
    },
    /// Public profile of a user.
    User {
        /// itch.io username.
        username: &'a str,
    },
}

impl<'a> Endpoint<'a> {
    /// Path segments after `{api_base}/{api_key}`.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Me => vec!["me"],
            Self::MyGames => vec!["my-games"],
            Self::GamePurchases { game_id } => vec!["game", game_id, "purchases"],
            Self::GameUploads { game_id } => vec!["game", game_id, "uploads"],
            Self::DownloadKeys { game_id, .. } => vec!["game", game_id, "download_keys"],
            Self::User { username } => vec!["user", username],
        }
    }

    /// Query parameter, if the endpoint takes one.
    pub fn query(&self) -> Option<(&'static str, &'a str)> {
        match *self {
            Self::DownloadKeys { download_key, .. } => Some(("download_key", download_key)),
            _ => None,
        }
    }
}

/// Build `{api_base}/{api_key}/{path}[?query]`.
///
/// Path segments and query values are percent-encoded. An empty API key is
/// reported as [`ItchError::MissingApiKey`] and logged; nothing is dispatched.
pub fn build_api_url(api_base: &str, api_key: &str, endpoint: &Endpoint<'_>) -> Result<String, ItchError> {
    if api_key.is_empty() {
        tracing::error!("itch.io API key not set");
        return Err(ItchError::MissingApiKey);
    }

    let mut url = Url::parse(api_base)
        .map_err(|e| ItchError::ConfigError(format!("Invalid api_base {:?}: {}", api_base, e)))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ItchError::ConfigError(format!("api_base {:?} cannot take a path", api_base)))?;
        segments.pop_if_empty().push(api_key);
        for segment in endpoint.segments() {
            segments.push(segment);
        }
    }

    if let Some((name, value)) = endpoint.query() {
        url.set_query(Some(&format!("{}={}", name, encode_component(value))));
    }

    Ok(url.into())
}
