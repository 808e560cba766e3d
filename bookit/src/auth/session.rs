//! Server-side session storage keyed by an opaque cookie token.
//!
//! The store is an explicit interface injected through `AppState` rather
//! than process-global state: handlers read sessions, and only login/logout
//! write them. Tokens are 32 random bytes, base64url-encoded, and carry no
//! information themselves - everything lives server-side in the store.

use std::time::Duration;

use axum::http::HeaderMap;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::RngCore;

use crate::config::SessionConfig;
use crate::types::AccountId;

/// What a session remembers about the authenticated account. This is the
/// sanitized subset returned by login and check-session; the password hash
/// never enters the store.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub account_id: AccountId,
    pub nombre: String,
    pub email: String,
    pub restaurante: String,
}

/// Session storage interface.
///
/// The in-memory implementation below is the only one shipped; a distributed
/// store would implement the same trait.
pub trait SessionStore: Send + Sync + 'static {
    /// Store session data under a token, replacing any previous entry.
    fn insert(&self, token: String, data: SessionData);

    /// Look up a live session. Expired entries behave like absent ones.
    fn get(&self, token: &str) -> Option<SessionData>;

    /// Destroy a session. Removing an unknown token is a no-op.
    fn remove(&self, token: &str);
}

struct Entry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// In-memory session store with per-entry expiry.
pub struct InMemorySessionStore {
    sessions: DashMap<String, Entry>,
    timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            timeout,
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, token: String, data: SessionData) {
        let expires_at = Utc::now() + self.timeout;
        self.sessions.insert(token, Entry { data, expires_at });
    }

    fn get(&self, token: &str) -> Option<SessionData> {
        let expired = match self.sessions.get(token) {
            Some(entry) if entry.expires_at > Utc::now() => return Some(entry.data.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(token);
        }
        None
    }

    fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }
}

/// Generate a new opaque session token (32 bytes of CSPRNG output,
/// base64url without padding).
pub fn generate_session_token() -> String {
    let mut token_bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut token_bytes);

    general_purpose::URL_SAFE_NO_PAD.encode(token_bytes)
}

/// Build the Set-Cookie value for a freshly created session.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
        config.cookie_name,
        token,
        config.cookie_same_site,
        config.timeout.as_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that clears the session cookie on logout.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0",
        config.cookie_name, config.cookie_same_site
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from a request's Cookie header, if present.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name == cookie_name {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn sample_data() -> SessionData {
        SessionData {
            account_id: 7,
            nombre: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            restaurante: "La Terraza".to_string(),
        }
    }

    #[test]
    fn test_insert_get_remove() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = generate_session_token();

        assert!(store.get(&token).is_none());

        store.insert(token.clone(), sample_data());
        let data = store.get(&token).expect("session should be present");
        assert_eq!(data.account_id, 7);
        assert_eq!(data.restaurante, "La Terraza");

        store.remove(&token);
        assert!(store.get(&token).is_none());

        // Removing again is a no-op
        store.remove(&token);
    }

    #[test]
    fn test_expired_sessions_are_absent() {
        let store = InMemorySessionStore::new(Duration::from_secs(0));
        let token = generate_session_token();
        store.insert(token.clone(), sample_data());

        assert!(store.get(&token).is_none());
    }

    #[test]
    fn test_token_shape() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_ne!(token1, token2);
        // 32 bytes base64url without padding
        assert_eq!(token1.len(), 43);
        assert!(token1.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_cookie_round_trip() {
        let config = SessionConfig::default();
        let cookie = session_cookie("abc123", &config);

        assert!(cookie.starts_with("bookit_session=abc123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("other=1; bookit_session=abc123; theme=dark"),
        );
        assert_eq!(token_from_headers(&headers, "bookit_session").as_deref(), Some("abc123"));
        assert!(token_from_headers(&headers, "missing").is_none());
    }

    #[test]
    fn test_secure_flag_from_config() {
        let config = SessionConfig {
            cookie_secure: true,
            ..Default::default()
        };
        assert!(session_cookie("t", &config).ends_with("; Secure"));
        assert!(clear_session_cookie(&config).contains("Max-Age=0"));
    }
}
