//! Transport for the remote bounty API
//!
//! Endpoints:
//! - `GET /bounties?filled=<bool>&status=<string>`
//! - `POST /bounties`
//! - `PATCH /bounties/{id}`
//! - `GET /bounties/{id}`

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::bounty::{Bounty, BountyPatch, STATUS_ACTIVE};
use crate::config::Config;
use crate::error::{BountyError, Result};

const USER_AGENT: &str = concat!("bounty-client/", env!("CARGO_PKG_VERSION"));

/// Query parameters for the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    pub filled: bool,
    pub status: String,
}

impl ListQuery {
    /// Unfilled, active bounties
    pub fn open() -> Self {
        Self {
            filled: false,
            status: STATUS_ACTIVE.to_string(),
        }
    }
}

/// Raw operations against the bounty API.
///
/// Listing returns the undecoded payload so callers can check its shape.
#[async_trait]
pub trait BountyApi: Send + Sync {
    async fn list_bounties(&self, query: &ListQuery) -> Result<Value>;

    async fn create_bounty(&self, payload: &BountyPatch) -> Result<Bounty>;

    async fn update_bounty(&self, id: &str, patch: &BountyPatch) -> Result<Bounty>;

    async fn get_bounty(&self, id: &str) -> Result<Bounty>;
}

/// reqwest-backed bounty API
pub struct HttpBountyApi {
    client: Client,
    base_url: String,
}

impl HttpBountyApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // Build HTTP client with timeout, falling back to default client if builder fails
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/bounties", self.base_url)
    }

    fn bounty_url(&self, id: &str) -> String {
        format!("{}/bounties/{}", self.base_url, urlencoding::encode(id))
    }

    fn with_headers(req: RequestBuilder) -> RequestBuilder {
        req.header("Accept", "application/json")
    }

    async fn send(req: RequestBuilder) -> Result<Response> {
        let resp = Self::with_headers(req).send().await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(BountyError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Body read failures are transport errors, bad JSON is a malformed response
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| BountyError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl BountyApi for HttpBountyApi {
    async fn list_bounties(&self, query: &ListQuery) -> Result<Value> {
        let url = self.collection_url();
        debug!("GET {} filled={} status={}", url, query.filled, query.status);

        let resp = Self::send(self.client.get(&url).query(query)).await?;
        Self::decode(resp).await
    }

    async fn create_bounty(&self, payload: &BountyPatch) -> Result<Bounty> {
        let url = self.collection_url();
        debug!("POST {}", url);

        let resp = Self::send(self.client.post(&url).json(payload)).await?;
        Self::decode(resp).await
    }

    async fn update_bounty(&self, id: &str, patch: &BountyPatch) -> Result<Bounty> {
        let url = self.bounty_url(id);
        debug!("PATCH {}", url);

        let resp = Self::send(self.client.patch(&url).json(patch)).await?;
        Self::decode(resp).await
    }

    async fn get_bounty(&self, id: &str) -> Result<Bounty> {
        let url = self.bounty_url(id);
        debug!("GET {}", url);

        match Self::send(self.client.get(&url)).await {
            Ok(resp) => Self::decode(resp).await,
            Err(BountyError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(BountyError::NotFound(id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode as AxumStatus;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn stored_bounty(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Fix parser",
            "description": "Crash on empty input",
            "value": 25,
            "bountyScore": 1,
            "creatingUsername": "alice",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z",
            "status": "active"
        })
    }

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/bounties",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    // Echo the query back so the test can inspect it
                    Json(json!([{
                        "id": "q",
                        "title": params.get("filled").cloned().unwrap_or_default(),
                        "description": params.get("status").cloned().unwrap_or_default(),
                        "value": 1
                    }]))
                })
                .post(|Json(body): Json<Value>| async move {
                    let mut created = body;
                    created["id"] = json!("new-1");
                    (AxumStatus::CREATED, Json(created))
                }),
            )
            .route(
                "/bounties/:id",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "missing" => AxumStatus::NOT_FOUND.into_response(),
                        "broken" => AxumStatus::INTERNAL_SERVER_ERROR.into_response(),
                        "garbled" => "<html>oops</html>".into_response(),
                        _ => Json(stored_bounty(&id)).into_response(),
                    }
                })
                .patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    let mut updated = stored_bounty(&id);
                    if let (Some(target), Some(fields)) = (updated.as_object_mut(), body.as_object()) {
                        for (k, v) in fields {
                            target.insert(k.clone(), v.clone());
                        }
                    }
                    Json(updated)
                }),
            )
    }

    #[test]
    fn test_urls() {
        let api = HttpBountyApi::new("https://api.example.com/", Duration::from_secs(5));
        assert_eq!(api.base_url(), "https://api.example.com");
        assert_eq!(api.collection_url(), "https://api.example.com/bounties");
        assert_eq!(
            api.bounty_url("a b/c"),
            "https://api.example.com/bounties/a%20b%2Fc"
        );
    }

    #[test]
    fn test_open_query() {
        let query = ListQuery::open();
        assert!(!query.filled);
        assert_eq!(query.status, "active");
    }

    #[tokio::test]
    async fn test_list_sends_query() {
        let base = spawn_stub(stub_router()).await;
        let api = HttpBountyApi::new(&base, Duration::from_secs(5));

        let payload = api.list_bounties(&ListQuery::open()).await.unwrap();
        let entries = payload.as_array().unwrap();
        assert_eq!(entries[0]["title"], "false");
        assert_eq!(entries[0]["description"], "active");
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let base = spawn_stub(stub_router()).await;
        let api = HttpBountyApi::new(&base, Duration::from_secs(5));

        let created = api
            .create_bounty(&BountyPatch::new("Title", "Desc", 10.0))
            .await
            .unwrap();
        assert_eq!(created.id, "new-1");
        assert_eq!(created.title, "Title");
        assert_eq!(created.value, 10.0);
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let base = spawn_stub(stub_router()).await;
        let api = HttpBountyApi::new(&base, Duration::from_secs(5));

        let patch = BountyPatch {
            tweet_id: Some("999".to_string()),
            ..Default::default()
        };
        let updated = api.update_bounty("b7", &patch).await.unwrap();
        assert_eq!(updated.id, "b7");
        assert_eq!(updated.tweet_id.as_deref(), Some("999"));
        assert_eq!(updated.title, "Fix parser");
    }

    #[tokio::test]
    async fn test_get_maps_status_codes() {
        let base = spawn_stub(stub_router()).await;
        let api = HttpBountyApi::new(&base, Duration::from_secs(5));

        let found = api.get_bounty("b1").await.unwrap();
        assert_eq!(found.id, "b1");

        match api.get_bounty("missing").await {
            Err(BountyError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }

        match api.get_bounty("broken").await {
            Err(BountyError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let base = spawn_stub(stub_router()).await;
        let api = HttpBountyApi::new(&base, Duration::from_secs(5));

        match api.get_bounty("garbled").await {
            Err(BountyError::MalformedResponse(_)) => {}
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let api = HttpBountyApi::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = api.get_bounty("b1").await.unwrap_err();
        assert!(err.is_transport());
    }
}
