//! # Session store — persisted authentication state
//!
//! [`SessionStore`] owns the only client-held entity with explicit persistence:
//! the [`AuthSession`] (user, bearer token, expiry). It sits on top of the
//! [`KeyValueStore`] trait so the same logic runs against browser local storage
//! ([`crate::LocalStorage`]) and the in-memory store used by tests
//! ([`crate::MemoryStore`]).
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `auth_state` | JSON-serialised [`AuthSession`]. |
//! | `token` | The bare bearer token, kept alongside the session for the older request path. |
//! | `rememberedEmail` / `rememberMe` | Login form "remember me" preference. |
//!
//! ## Expiry
//!
//! [`SessionStore::persist`] stamps `expiresAt = now + ttl` (24 hours by
//! default). [`SessionStore::restore`] is called once at start-up: an expired
//! or unreadable session is deleted and never restored. There is no silent
//! refresh and expiry is not re-checked while the app runs.

use crate::error::StoreError;
use crate::models::{AuthResponse, AuthSession};

pub const AUTH_STORAGE_KEY: &str = "auth_state";
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";
pub const REMEMBER_ME_KEY: &str = "rememberMe";

const DEFAULT_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Reads and writes the persisted [`AuthSession`].
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    kv: S,
    ttl_ms: i64,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            ttl_ms: DEFAULT_TTL_MS,
        }
    }

    /// Builder method to override the session lifetime.
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Decode the stored session without checking expiry.
    pub fn read(&self) -> Result<Option<AuthSession>, StoreError> {
        let Some(raw) = self.kv.get(AUTH_STORAGE_KEY) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(StoreError::Corrupt)
    }

    /// Load the session at start-up. Expired and corrupt sessions are removed
    /// from storage and `None` is returned.
    pub fn restore(&self, now_ms: i64) -> Option<AuthSession> {
        let session = match self.read() {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(_) => {
                self.clear();
                return None;
            }
        };

        if session.is_expired(now_ms) {
            self.clear();
            return None;
        }

        if !session.token.is_empty() {
            self.kv.set(LEGACY_TOKEN_KEY, &session.token);
        }
        Some(session)
    }

    /// Store a fresh session after login or registration.
    pub fn persist(&self, response: AuthResponse, now_ms: i64) -> Result<AuthSession, StoreError> {
        let (user, token) = response.into_parts();
        let session = AuthSession {
            user,
            token,
            expires_at: Some(now_ms + self.ttl_ms),
        };
        let raw = serde_json::to_string(&session).map_err(StoreError::Encode)?;
        self.kv.set(AUTH_STORAGE_KEY, &raw);
        self.kv.set(LEGACY_TOKEN_KEY, &session.token);
        Ok(session)
    }

    /// Forget the session and the bare token.
    pub fn clear(&self) {
        self.kv.remove(AUTH_STORAGE_KEY);
        self.kv.remove(LEGACY_TOKEN_KEY);
    }

    pub fn remembered_email(&self) -> Option<String> {
        self.kv
            .get(REMEMBERED_EMAIL_KEY)
            .filter(|email| !email.is_empty())
    }

    /// Save the email for the next visit, or forget it when `None`.
    pub fn remember_email(&self, email: Option<&str>) {
        match email {
            Some(email) => {
                self.kv.set(REMEMBERED_EMAIL_KEY, email);
                self.kv.set(REMEMBER_ME_KEY, "true");
            }
            None => {
                self.kv.remove(REMEMBERED_EMAIL_KEY);
                self.kv.remove(REMEMBER_ME_KEY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    const HOUR: i64 = 60 * 60 * 1000;

    fn response() -> AuthResponse {
        AuthResponse {
            id: 7,
            email: "ana@example.com".into(),
            name: "Ana".into(),
            role: "User".into(),
            token: "tok-123".into(),
        }
    }

    #[test]
    fn test_persist_sets_expiry_and_token() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(kv.clone());

        let now = 1_000_000;
        let session = sessions.persist(response(), now).unwrap();
        assert_eq!(session.expires_at, Some(now + 24 * HOUR));
        assert_eq!(session.user.name, "Ana");
        assert_eq!(kv.get(LEGACY_TOKEN_KEY).as_deref(), Some("tok-123"));
        assert_eq!(sessions.read().unwrap().unwrap().token, "tok-123");
    }

    #[test]
    fn test_restore_after_reload_keeps_user() {
        let kv = MemoryStore::new();
        let now = 5_000;
        SessionStore::new(kv.clone()).persist(response(), now).unwrap();

        // A new store over the same storage behaves like a page reload.
        let reloaded = SessionStore::new(kv);
        let session = reloaded.restore(now + HOUR).unwrap();
        assert_eq!(session.user.id, 7);
        assert_eq!(session.token, "tok-123");
    }

    #[test]
    fn test_expired_session_is_never_restored() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(kv.clone());
        let now = 5_000;
        sessions.persist(response(), now).unwrap();

        assert!(sessions.restore(now + 24 * HOUR).is_none());
        assert!(kv.get(AUTH_STORAGE_KEY).is_none());
        assert!(kv.get(LEGACY_TOKEN_KEY).is_none());
        // Still gone on the next load.
        assert!(sessions.restore(now).is_none());
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let kv = MemoryStore::new();
        kv.set(AUTH_STORAGE_KEY, "{not json");
        let sessions = SessionStore::new(kv.clone());

        assert!(matches!(sessions.read(), Err(StoreError::Corrupt(_))));
        assert!(sessions.restore(0).is_none());
        assert!(kv.get(AUTH_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_session_without_expiry_restores() {
        let kv = MemoryStore::new();
        kv.set(
            AUTH_STORAGE_KEY,
            r#"{"user":{"id":1,"email":"a@b.c","name":"A","role":"Admin"},"token":"t"}"#,
        );
        let sessions = SessionStore::new(kv.clone());
        let session = sessions.restore(i64::MAX).unwrap();
        assert!(session.user.is_admin());
        assert_eq!(kv.get(LEGACY_TOKEN_KEY).as_deref(), Some("t"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(kv.clone());
        sessions.persist(response(), 0).unwrap();
        sessions.clear();
        assert!(sessions.read().unwrap().is_none());
        assert!(kv.get(LEGACY_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_custom_ttl() {
        let sessions = SessionStore::new(MemoryStore::new()).with_ttl_ms(HOUR);
        let session = sessions.persist(response(), 0).unwrap();
        assert_eq!(session.expires_at, Some(HOUR));
        assert!(sessions.restore(HOUR - 1).is_some());
        assert!(sessions.restore(HOUR).is_none());
    }

    #[test]
    fn test_remember_email() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(kv.clone());
        assert!(sessions.remembered_email().is_none());

        sessions.remember_email(Some("ana@example.com"));
        assert_eq!(sessions.remembered_email().as_deref(), Some("ana@example.com"));
        assert_eq!(kv.get(REMEMBER_ME_KEY).as_deref(), Some("true"));

        sessions.remember_email(None);
        assert!(sessions.remembered_email().is_none());
        assert!(kv.get(REMEMBER_ME_KEY).is_none());
    }
}
