//! Typed REST client: one method per backend endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use store::admin::{FilmDraft, UserDraft};
use store::models::{LoginRequest, RegisterRequest};
use store::reviews::ReviewSubmission;
use store::{AdminUser, AuthResponse, Favorite, Film, Genre, Review, WatchHistory};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Filters for `GET /films`. `None` fields are left out of the query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilmQuery {
    pub search: Option<String>,
    pub genre_id: Option<i64>,
    pub year: Option<i32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilmQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            request = request.with_query("search", search);
        }
        if let Some(genre_id) = self.genre_id {
            request = request.with_query("genreId", genre_id);
        }
        if let Some(year) = self.year {
            request = request.with_query("year", year);
        }
        if let Some(page) = self.page {
            request = request.with_query("page", page);
        }
        if let Some(page_size) = self.page_size {
            request = request.with_query("pageSize", page_size);
        }
        request
    }
}

/// A page of results with the counts from the `X-Total-*` headers.
#[derive(Clone, Debug, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl<T> Paginated<T> {
    fn from_headers(items: Vec<T>, response: &ApiResponse) -> Self {
        fn header_or<N: std::str::FromStr>(response: &ApiResponse, name: &str, default: N) -> N {
            response
                .header(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }
        Self {
            items,
            total_count: header_or(response, "x-total-count", 0),
            total_pages: header_or(response, "x-total-pages", 0),
            current_page: header_or(response, "x-current-page", 1),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilmRef {
    film_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoUrlUpdate<'a> {
    video_url: &'a str,
}

/// Client for the REST backend.
///
/// The bearer token is fixed per client; build a new one with
/// [`ApiClient::with_token`] when the session changes.
#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = request.with_bearer(self.token.as_deref());
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::error!(
                "{} {} returned {}: {}",
                method.as_str(),
                path,
                response.status,
                response.body
            );
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        decode(&response)
    }

    async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    // ---- films ----

    pub async fn all_films(&self) -> Result<Vec<Film>, ApiError> {
        self.fetch(ApiRequest::get("/films/all")).await
    }

    pub async fn films_page(&self, query: &FilmQuery) -> Result<Paginated<Film>, ApiError> {
        let response = self.send(query.apply(ApiRequest::get("/films"))).await?;
        let items = decode(&response)?;
        Ok(Paginated::from_headers(items, &response))
    }

    pub async fn films_by_genre(&self, genre_id: i64) -> Result<Vec<Film>, ApiError> {
        let query = FilmQuery {
            genre_id: Some(genre_id),
            ..FilmQuery::default()
        };
        self.fetch(query.apply(ApiRequest::get("/films"))).await
    }

    pub async fn film(&self, id: i64) -> Result<Film, ApiError> {
        self.fetch(ApiRequest::get(format!("/films/{id}"))).await
    }

    pub async fn create_film(&self, draft: &FilmDraft) -> Result<Film, ApiError> {
        self.fetch(ApiRequest::post("/films").with_json(draft)?).await
    }

    pub async fn update_film(&self, film: &Film) -> Result<(), ApiError> {
        self.execute(ApiRequest::put(format!("/films/{}", film.id)).with_json(film)?)
            .await
    }

    pub async fn delete_film(&self, id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/films/{id}"))).await
    }

    /// Point a film at a locally available video file.
    pub async fn set_video_url(&self, id: i64, video_url: &str) -> Result<Film, ApiError> {
        let body = VideoUrlUpdate { video_url };
        self.fetch(ApiRequest::put(format!("/films/{id}/video-url")).with_json(&body)?)
            .await
    }

    // ---- genres ----

    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.fetch(ApiRequest::get("/genres")).await
    }

    pub async fn genre(&self, id: i64) -> Result<Genre, ApiError> {
        self.fetch(ApiRequest::get(format!("/genres/{id}"))).await
    }

    // ---- auth ----

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.fetch(ApiRequest::post("/auth/login").with_json(&body)?)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(ApiRequest::post("/auth/register").with_json(request)?)
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute(ApiRequest::post("/auth/logout")).await
    }

    // ---- favorites ----

    pub async fn favorites(&self) -> Result<Vec<Favorite>, ApiError> {
        self.fetch(ApiRequest::get("/favorites")).await
    }

    pub async fn add_favorite(&self, film_id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::post("/favorites").with_json(&FilmRef { film_id })?)
            .await
    }

    pub async fn remove_favorite(&self, film_id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/favorites/{film_id}")))
            .await
    }

    // ---- reviews ----

    pub async fn film_reviews(&self, film_id: i64) -> Result<Vec<Review>, ApiError> {
        self.fetch(ApiRequest::get(format!("/reviews/film/{film_id}")))
            .await
    }

    pub async fn user_reviews(&self, user_id: i64) -> Result<Vec<Review>, ApiError> {
        self.fetch(ApiRequest::get(format!("/reviews/user/{user_id}")))
            .await
    }

    pub async fn add_review(&self, review: &ReviewSubmission) -> Result<(), ApiError> {
        self.execute(ApiRequest::post("/reviews").with_json(review)?)
            .await
    }

    pub async fn update_review(&self, id: i64, review: &ReviewSubmission) -> Result<(), ApiError> {
        self.execute(ApiRequest::put(format!("/reviews/{id}")).with_json(review)?)
            .await
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/reviews/{id}"))).await
    }

    // ---- watch history ----

    pub async fn watch_history(&self) -> Result<Vec<WatchHistory>, ApiError> {
        self.fetch(ApiRequest::get("/watch-history")).await
    }

    pub async fn add_watch_history(&self, film_id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::post("/watch-history").with_json(&FilmRef { film_id })?)
            .await
    }

    // ---- users (admin) ----

    pub async fn users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.fetch(ApiRequest::get("/users")).await
    }

    pub async fn user(&self, id: i64) -> Result<AdminUser, ApiError> {
        self.fetch(ApiRequest::get(format!("/users/{id}"))).await
    }

    /// Fetch the stored record for its audit fields, then `PUT` the draft
    /// merged over it. Returns the merged record.
    pub async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<AdminUser, ApiError> {
        let stored = self.user(id).await?;
        let merged = draft.apply_to(&stored);
        self.execute(ApiRequest::put(format!("/users/{id}")).with_json(&merged)?)
            .await?;
        Ok(merged)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/users/{id}"))).await
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::error!("failed to decode response: {}", e);
        ApiError::Decode(e.to_string())
    })
}

/// Error body shape some endpoints return: `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Best human-readable message for an error, preferring the backend's own.
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Status { body, .. } => serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use crate::transport::Method;

    const FILM: &str = r#"{"id":3,"title":"Heat","releaseYear":1995,"rating":8.3,
        "genres":[{"id":2,"name":"Crime"}]}"#;

    fn client(fake: &FakeTransport) -> ApiClient<FakeTransport> {
        ApiClient::new(fake.clone()).with_token(Some("tok".into()))
    }

    #[tokio::test]
    async fn test_films_page_reads_headers() {
        let fake = FakeTransport::new();
        fake.respond(
            "/films",
            ApiResponse::new(200, format!("[{FILM}]"))
                .with_header("X-Total-Count", "41")
                .with_header("X-Total-Pages", "3")
                .with_header("X-Current-Page", "2"),
        );
        let query = FilmQuery {
            search: Some(" heat ".into()),
            genre_id: Some(2),
            year: None,
            page: Some(2),
            page_size: Some(20),
        };
        let page = client(&fake).films_page(&query).await.unwrap();
        assert_eq!(page.items[0].title, "Heat");
        assert_eq!(page.total_count, 41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);

        let sent = fake.last_request();
        assert_eq!(
            sent.query,
            vec![
                ("search".to_string(), "heat".to_string()),
                ("genreId".to_string(), "2".to_string()),
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(sent.bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_pagination_header_defaults() {
        let fake = FakeTransport::new();
        fake.respond("/films", ApiResponse::new(200, "[]"));
        let page = client(&fake).films_page(&FilmQuery::default()).await.unwrap();
        assert_eq!((page.total_count, page.total_pages, page.current_page), (0, 0, 1));
        assert!(fake.last_request().query.is_empty());
    }

    #[tokio::test]
    async fn test_status_and_decode_errors() {
        let fake = FakeTransport::new();
        fake.respond("/films/1", ApiResponse::new(401, "nope"));
        fake.respond("/films/2", ApiResponse::new(200, "<html>"));

        let err = client(&fake).film(1).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(matches!(client(&fake).film(2).await, Err(ApiError::Decode(_))));
        assert!(client(&fake).film(99).await.unwrap_err().is_not_found());

        fake.go_offline();
        assert!(matches!(client(&fake).genres().await, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_anonymous_client_sends_no_bearer() {
        let fake = FakeTransport::new();
        fake.respond("/genres", ApiResponse::new(200, r#"[{"id":1,"name":"Drama"}]"#));
        let genres = ApiClient::new(fake.clone()).genres().await.unwrap();
        assert_eq!(genres[0].name, "Drama");
        assert_eq!(fake.last_request().bearer, None);
    }

    #[tokio::test]
    async fn test_favorite_toggle_requests() {
        let fake = FakeTransport::new();
        fake.respond("/favorites", ApiResponse::new(201, "{}"));
        fake.respond("/favorites/3", ApiResponse::new(204, ""));
        let api = client(&fake);

        api.add_favorite(3).await.unwrap();
        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.body.as_deref(), Some(r#"{"filmId":3}"#));

        api.remove_favorite(3).await.unwrap();
        assert_eq!(fake.last_request().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_set_video_url() {
        let fake = FakeTransport::new();
        fake.respond("/films/3/video-url", ApiResponse::new(200, FILM));
        let film = client(&fake).set_video_url(3, "mp4/Heat.mp4").await.unwrap();
        assert_eq!(film.id, 3);
        let sent = fake.last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.body.as_deref(), Some(r#"{"videoUrl":"mp4/Heat.mp4"}"#));
    }

    #[tokio::test]
    async fn test_update_user_merges_stored_record() {
        let fake = FakeTransport::new();
        fake.respond_to(
            Method::Get,
            "/users/5",
            ApiResponse::new(
                200,
                r#"{"id":5,"name":"Old","email":"old@x.io","role":"user",
                    "createdAt":"2024-01-01T00:00:00","passwordHash":"h"}"#,
            ),
        );
        fake.respond_to(Method::Put, "/users/5", ApiResponse::new(204, ""));

        let draft = UserDraft {
            name: "New".into(),
            email: "new@x.io".into(),
            role: "admin".into(),
        };
        let merged = client(&fake).update_user(5, &draft).await.unwrap();
        assert_eq!(merged.name, "New");

        let put = fake.last_request();
        assert_eq!(put.method, Method::Put);
        let body: serde_json::Value = serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["passwordHash"], "h");
        assert_eq!(body["createdAt"], "2024-01-01T00:00:00");
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn test_update_user_stops_when_lookup_fails() {
        let fake = FakeTransport::new();
        let result = client(&fake).update_user(5, &UserDraft::default()).await;
        assert!(result.is_err());
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_login_and_watch_history() {
        let fake = FakeTransport::new();
        fake.respond(
            "/auth/login",
            ApiResponse::new(
                200,
                r#"{"id":1,"email":"a@b.c","name":"A","role":"admin","token":"jwt"}"#,
            ),
        );
        fake.respond("/watch-history", ApiResponse::new(201, ""));
        let api = ApiClient::new(fake.clone());

        let auth = api.login(" a@b.c ", "pw").await.unwrap();
        assert_eq!(auth.token, "jwt");
        let body: serde_json::Value =
            serde_json::from_str(fake.last_request().body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.c");

        api.add_watch_history(3).await.unwrap();
        assert_eq!(fake.last_request().body.as_deref(), Some(r#"{"filmId":3}"#));
    }

    #[test]
    fn test_error_message_prefers_backend_text() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"message":"Email already registered"}"#.into(),
        };
        assert_eq!(error_message(&err, "Failed"), "Email already registered");
        assert_eq!(
            error_message(&ApiError::Transport("x".into()), "Failed"),
            "Failed"
        );
    }
}
