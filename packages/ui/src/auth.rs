//! Authentication context and actions for the UI.

use api::{error_message, ApiClient, Transport};
use dioxus::prelude::*;
use store::clock::now_millis;
use store::models::RegisterRequest;
use store::{KeyValueStore, SessionStore, User};

use crate::client::{make_session_store, use_config, Api};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that restores the persisted session once at start-up.
/// An expired session is dropped here and never re-checked while the app runs.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_config();
    let auth_state = use_signal(move || {
        match make_session_store(&config).restore(now_millis()) {
            Some(session) => {
                tracing::info!("restored session for {}", session.user.email);
                AuthState {
                    user: Some(session.user),
                    token: Some(session.token),
                }
            }
            None => AuthState::default(),
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in and persist the session. `remember` keeps the email for the next visit.
pub async fn sign_in(
    api: Api,
    config: &store::AppConfig,
    email: &str,
    password: &str,
    remember: bool,
) -> Result<User, String> {
    let response = api.client().login(email, password).await.map_err(|e| {
        tracing::warn!("login failed: {}", e);
        "Invalid email or password".to_string()
    })?;

    let sessions = make_session_store(config);
    sessions.remember_email(remember.then_some(email.trim()));
    establish(api, &sessions, response)
}

/// Create an account and sign in as it.
pub async fn sign_up(
    api: Api,
    config: &store::AppConfig,
    request: &RegisterRequest,
) -> Result<User, String> {
    let response = api.client().register(request).await.map_err(|e| {
        tracing::warn!("registration failed: {}", e);
        error_message(&e, "Failed to register")
    })?;
    establish(api, &make_session_store(config), response)
}

fn establish<S: KeyValueStore>(
    api: Api,
    sessions: &SessionStore<S>,
    response: store::AuthResponse,
) -> Result<User, String> {
    let session = sessions.persist(response, now_millis()).map_err(|e| {
        tracing::error!("could not persist session: {}", e);
        "Could not save your session".to_string()
    })?;
    let mut auth = api.auth();
    auth.set(AuthState {
        user: Some(session.user.clone()),
        token: Some(session.token),
    });
    Ok(session.user)
}

/// Best-effort server logout; the local session is always cleared.
pub async fn sign_out(api: Api, config: &store::AppConfig) {
    end_session(&api.client(), &make_session_store(config)).await;
    let mut auth = api.auth();
    auth.set(AuthState::default());
}

async fn end_session<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    sessions: &SessionStore<S>,
) {
    if let Err(e) = client.logout().await {
        tracing::warn!("logout request failed: {}", e);
    }
    sessions.clear();
}

/// Email saved by "Remember me", if any.
pub fn remembered_email(config: &store::AppConfig) -> Option<String> {
    make_session_store(config).remembered_email()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiError, ApiRequest, ApiResponse};
    use store::session::{AUTH_STORAGE_KEY, LEGACY_TOKEN_KEY};
    use store::{AuthResponse, MemoryStore};

    struct Unreachable;

    impl Transport for Unreachable {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
            Err(ApiError::Transport("network unreachable".into()))
        }
    }

    struct Accepting;

    impl Transport for Accepting {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::new(200, ""))
        }
    }

    fn signed_in() -> (MemoryStore, SessionStore<MemoryStore>) {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(kv.clone());
        sessions
            .persist(
                AuthResponse {
                    id: 1,
                    email: "ana@example.com".into(),
                    name: "Ana".into(),
                    role: "User".into(),
                    token: "tok".into(),
                },
                0,
            )
            .unwrap();
        (kv, sessions)
    }

    #[tokio::test]
    async fn test_failed_logout_still_clears_session() {
        let (kv, sessions) = signed_in();
        let client = ApiClient::new(Unreachable).with_token(Some("tok".into()));

        end_session(&client, &sessions).await;

        assert!(kv.get(AUTH_STORAGE_KEY).is_none());
        assert!(kv.get(LEGACY_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (kv, sessions) = signed_in();
        let client = ApiClient::new(Accepting).with_token(Some("tok".into()));

        end_session(&client, &sessions).await;

        assert!(kv.get(AUTH_STORAGE_KEY).is_none());
        assert!(kv.get(LEGACY_TOKEN_KEY).is_none());
    }
}
