//! In-memory [`Transport`] for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Canned responses by path, with every request recorded. Unknown paths get 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    routes: Arc<Mutex<HashMap<(Option<Method>, String), ApiResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    offline: Arc<Mutex<bool>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any method on `path`.
    pub fn respond(&self, path: &str, response: ApiResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert((None, path.to_string()), response);
    }

    /// Answer only `method` on `path`.
    pub fn respond_to(&self, method: Method, path: &str, response: ApiResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert((Some(method), path.to_string()), response);
    }

    /// Fail every request at the network level.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if *self.offline.lock().unwrap() {
            return Err(ApiError::Transport("network unreachable".into()));
        }
        let routes = self.routes.lock().unwrap();
        let response = routes
            .get(&(Some(request.method), request.path.clone()))
            .or_else(|| routes.get(&(None, request.path.clone())))
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, "Not Found"));
        Ok(response)
    }
}
