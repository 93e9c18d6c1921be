//! Shared constructors for the session store and the API client.
//!
//! Returns a [`store::SessionStore`] backed by the appropriate
//! [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorage`]
//! - **Elsewhere**: an in-memory [`store::MemoryStore`]
//!
//! The API client is reached through [`use_api`], which pairs the app-wide
//! cached transport with the bearer token of the current session.

use api::{ApiClient, HttpTransport};
use dioxus::prelude::*;
use store::AppConfig;

use crate::auth::{use_auth, AuthState};

/// Create a platform-appropriate session store using the configured lifetime.
pub fn make_session_store(config: &AppConfig) -> store::SessionStore<impl store::KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::SessionStore::new(store::LocalStorage::new()).with_ttl_ms(config.session_ttl_ms())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::SessionStore::new(store::MemoryStore::new()).with_ttl_ms(config.session_ttl_ms())
    }
}

/// App configuration provided by the platform crate.
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>()
}

/// Provide the config and the shared transport to every component below.
pub fn provide_app_context(config: AppConfig) {
    let config = use_context_provider(|| config);
    use_context_provider(move || {
        tracing::info!("API base URL: {}", config.api.base_url);
        Signal::new(api::http_transport(&config.api.base_url, config.api.cache_ttl_secs))
    });
}

/// Copyable handle for building API clients inside event handlers and resources.
#[derive(Clone, Copy, PartialEq)]
pub struct Api {
    transport: Signal<HttpTransport>,
    auth: Signal<AuthState>,
}

impl Api {
    /// A client carrying the current session's token. Reading the token
    /// subscribes the calling scope, so resources refetch on sign-in/out.
    pub fn client(&self) -> ApiClient<HttpTransport> {
        let token = self.auth.read().token.clone();
        ApiClient::new(self.transport.peek().clone()).with_token(token)
    }

    pub fn auth(&self) -> Signal<AuthState> {
        self.auth
    }
}

pub fn use_api() -> Api {
    let transport = use_context::<Signal<HttpTransport>>();
    let auth = use_auth();
    Api { transport, auth }
}
