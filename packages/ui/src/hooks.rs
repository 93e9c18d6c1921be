//! Data-fetch hooks and small timing helpers.

use std::future::Future;
use std::time::Duration;

use api::{ApiClient, ApiError, HttpTransport};
use dioxus::prelude::*;

use crate::client::use_api;

/// How long admin success notices stay on screen.
pub const FLASH_MS: u64 = 3000;

/// What a view shows for one fetched collection or record.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T: Clone> FetchState<T> {
    /// Read a resource, collapsing any error to the view's one failure message.
    pub fn of(resource: &Resource<Result<T, ApiError>>, failure: &str) -> Self {
        match &*resource.read() {
            None => FetchState::Loading,
            Some(Ok(value)) => FetchState::Ready(value.clone()),
            Some(Err(_)) => FetchState::Failed(failure.to_string()),
        }
    }
}

/// `use_resource` over a fresh [`ApiClient`]. Signals read inside `fetch`
/// (and the session token) re-run it when they change; the task is dropped
/// with the component.
pub fn use_api_resource<T, F, Fut>(mut fetch: F) -> Resource<Result<T, ApiError>>
where
    T: 'static,
    F: FnMut(ApiClient<HttpTransport>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    use_resource(move || fetch(api.client()))
}

/// Mirror a prop into a signal so resources can depend on it.
pub fn use_prop_signal<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    let mut signal = use_signal(|| value.clone());
    if *signal.peek() != value {
        signal.set(value);
    }
    signal
}

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(Duration::from_millis(ms)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// A success notice that hides itself after [`FLASH_MS`].
#[derive(Clone, Copy, PartialEq)]
pub struct Flash {
    message: Signal<Option<String>>,
    epoch: Signal<u64>,
}

impl Flash {
    pub fn message(&self) -> Option<String> {
        self.message.read().clone()
    }

    pub fn show(&self, text: impl Into<String>) {
        let mut message = self.message;
        let mut epoch = self.epoch;
        message.set(Some(text.into()));
        let mine = *epoch.peek() + 1;
        epoch.set(mine);
        spawn(async move {
            sleep_ms(FLASH_MS).await;
            if *epoch.peek() == mine {
                message.set(None);
            }
        });
    }
}

pub fn use_flash() -> Flash {
    Flash {
        message: use_signal(|| None),
        epoch: use_signal(|| 0),
    }
}
