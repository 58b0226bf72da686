mod details;
mod extras;
mod resolve;
mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use tabemap_places::{PlacesClient, PlacesError};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PlacesClient>,
    pub config: Arc<tabemap_core::AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    /// Upstream error body, present only on passthrough failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            details: None,
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub fn with_details(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        let mut err = Self::new(request_id, code, message);
        err.details = Some(details);
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" | "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a `PlacesError` from a passthrough endpoint to a response mirroring
/// the upstream status, with the upstream body attached as `details`.
pub(super) fn upstream_error_response(request_id: &str, error: &PlacesError) -> Response {
    match error {
        PlacesError::Upstream {
            status, details, ..
        } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            let body = ApiError::with_details(
                request_id,
                "upstream_error",
                error.to_string(),
                details.clone(),
            );
            (status, Json(body)).into_response()
        }
        _ => {
            let body = ApiError::new(request_id, "bad_gateway", error.to_string());
            (StatusCode::BAD_GATEWAY, Json(body)).into_response()
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/resolve", post(resolve::resolve_names))
        .route(
            "/api/v1/search",
            post(search::search_post).get(search::search_get),
        )
        .route("/api/v1/places/{place_id}", get(details::get_place_details))
        .route("/api/v1/regions", get(extras::list_regions))
        .route("/api/v1/csv/titles", post(extras::extract_csv_titles))
        .route("/api/v1/icons", get(extras::icons_for_type))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(_state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> tabemap_core::AppConfig {
        tabemap_core::AppConfig {
            env: tabemap_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            log_level: "info".to_string(),
            google_maps_api_key: "test-key".to_string(),
            places_base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 5,
            resolve_batch_size: 5,
            default_language: "ja".to_string(),
        }
    }

    fn test_app(upstream_url: &str) -> Router {
        let client = PlacesClient::with_base_url("test-key", 5, upstream_url)
            .expect("client construction should not fail");
        build_app(
            AppState {
                client: Arc::new(client),
                config: Arc::new(test_config()),
            },
            default_rate_limit_state(),
        )
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let app = test_app("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().expect("ascii")),
            Some("req-42")
        );
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-42");
    }

    #[tokio::test]
    async fn resolve_rejects_empty_name_list_before_any_upstream_call() {
        let app = test_app("http://127.0.0.1:1");
        let body = json!({ "names": [], "region": "tokyo" });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn resolve_rejects_blank_names() {
        let app = test_app("http://127.0.0.1:1");
        let body = json!({ "names": ["Cafe A", "  "], "region": "tokyo" });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_region() {
        let app = test_app("http://127.0.0.1:1");
        let body = json!({ "names": ["Cafe A"], "region": "osaka" });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(json["error"]["message"]
            .as_str()
            .expect("message")
            .contains("osaka"));
    }

    #[tokio::test]
    async fn resolve_returns_partitioned_results_and_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({ "textQuery": "Cafe A" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [ { "id": "p1" } ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({ "textQuery": "Cafe B" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/places/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "displayName": { "text": "Cafe A" },
                "businessStatus": "OPERATIONAL"
            })))
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let body = json!({ "names": ["Cafe A", "Cafe B"], "region": "fukuoka" });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;

        let results = json["data"]["results"].as_array().expect("results");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["name"], "Cafe A");
        assert_eq!(results[0]["placeId"], "p1");
        assert_eq!(results[0]["details"]["displayName"]["text"], "Cafe A");
        assert_eq!(results[0]["details"]["businessStatus"], "OPERATIONAL");

        let errors = json["data"]["errors"].as_array().expect("errors");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["name"], "Cafe B");
        assert_eq!(errors[0]["message"], "No place found");
        assert_eq!(errors[0]["stage"], "text-search");
    }

    #[tokio::test]
    async fn resolve_strips_reviews_from_details_mask_override() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [ { "id": "p1" } ]
            })))
            .mount(&server)
            .await;

        // Only matches when the sanitized mask arrives; an unsanitized mask
        // would miss this mock and the item would come back as an error.
        Mock::given(method("GET"))
            .and(path("/places/p1"))
            // wiremock's `header` matcher splits received values on commas,
            // so a comma-joined field mask needs the `headers` matcher.
            .and(headers("X-Goog-FieldMask", vec!["rating", "websiteUri"]))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rating": 4.5
            })))
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let body = json!({
            "names": ["Cafe A"],
            "region": "tokyo",
            "detailsFields": "rating,reviews,websiteUri,reviews.text"
        });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["results"].as_array().expect("results").len(), 1);
        assert!(json["data"]["errors"].as_array().expect("errors").is_empty());
    }

    #[tokio::test]
    async fn search_passthrough_mirrors_upstream_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "message": "backend unavailable" }
            })))
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let body = json!({ "textQuery": "ramen", "region": "fukuoka" });
        let response = app
            .oneshot(post_json("/api/v1/search", &body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "upstream_error");
        assert_eq!(json["details"]["error"]["message"], "backend unavailable");
    }

    #[tokio::test]
    async fn search_get_builds_bias_from_coordinates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({
                "textQuery": "coffee",
                "locationBias": {
                    "circle": {
                        "center": { "latitude": 35.68, "longitude": 139.76 },
                        "radius": 500.0
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [ { "id": "p-coffee", "displayName": { "text": "Coffee" } } ]
            })))
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search?q=coffee&lat=35.68&lng=139.76&radius=500")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["places"][0]["id"], "p-coffee");
    }

    #[tokio::test]
    async fn place_details_passthrough_returns_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/places/p9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "displayName": { "text": "喫茶ソワレ" },
                "businessStatus": "CLOSED_TEMPORARILY"
            })))
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places/p9")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["displayName"]["text"], "喫茶ソワレ");
        assert_eq!(json["data"]["businessStatus"], "CLOSED_TEMPORARILY");
    }

    #[tokio::test]
    async fn regions_endpoint_lists_supported_regions() {
        let app = test_app("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let regions = json["data"].as_array().expect("regions");
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0]["region"], "tokyo");
        assert_eq!(regions[0]["bias"]["radius"], 25000.0);
        assert_eq!(regions[1]["region"], "fukuoka");
    }

    #[tokio::test]
    async fn csv_titles_endpoint_extracts_first_column() {
        let app = test_app("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/csv/titles")
                    .header("content-type", "text/plain; charset=utf-8")
                    .body(Body::from("タイトル,住所\nCafe A,Tokyo\nCafe B,Fukuoka\nCafe A,Tokyo\n"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["titles"], json!(["Cafe A", "Cafe B"]));
    }

    #[tokio::test]
    async fn icons_endpoint_maps_primary_type() {
        let app = test_app("http://127.0.0.1:1");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/icons?primaryType=cafe")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["icons"], json!(["☕"]));
    }

    #[tokio::test]
    async fn rate_limit_rejects_requests_over_the_window_cap() {
        let client = PlacesClient::with_base_url("test-key", 5, "http://127.0.0.1:1")
            .expect("client construction should not fail");
        let app = build_app(
            AppState {
                client: Arc::new(client),
                config: Arc::new(test_config()),
            },
            RateLimitState::new(1, Duration::from_secs(60)),
        );

        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
