//! itch.io OAuth authorization helpers.
//!
//! Only the implicit-grant authorization URL is built here; no network call is
//! made. The scope is always `profile:me`, the only one itch.io grants.

use crate::config::Credentials;
use crate::protocol::endpoints::encode_component;
use crate::ItchError;

/// itch.io OAuth authorization page.
pub const OAUTH_AUTHORIZE_URL: &str = "https://itch.io/user/oauth";

/// Build the authorization URL.
///
/// Empty `client_id` / `redirect_uri` fall back to the configured credentials.
/// An empty `state` is omitted. All values are percent-encoded.
pub fn build_authorize_url(
    credentials: &Credentials,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<String, ItchError> {
    let client_id = non_empty_or(client_id, credentials.oauth_client_id());
    let redirect_uri = non_empty_or(redirect_uri, credentials.oauth_redirect_uri());

    if client_id.is_empty() {
        tracing::error!("OAuth client_id must be set (parameter or credentials)");
        return Err(ItchError::MissingParameter { name: "client_id" });
    }
    if redirect_uri.is_empty() {
        tracing::error!("OAuth redirect_uri must be set (parameter or credentials)");
        return Err(ItchError::MissingParameter { name: "redirect_uri" });
    }

    let mut params = vec![
        ("client_id", client_id),
        ("scope", credentials.oauth_scope()),
        ("redirect_uri", redirect_uri),
    ];
    if !state.is_empty() {
        params.push(("state", state));
    }

    let query = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(format!("{}?{}", OAUTH_AUTHORIZE_URL, query))
}

/// Build the authorization URL and open it in the system browser.
///
/// Returns the URL that was opened.
pub fn start_authorization(
    credentials: &Credentials,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<String, ItchError> {
    let url = build_authorize_url(credentials, client_id, redirect_uri, state)?;

    open::that(&url).map_err(|e| {
        tracing::error!(error = %e, "Failed to open OAuth authorization URL in browser");
        ItchError::BrowserLaunch(e.to_string())
    })?;

    Ok(url)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
