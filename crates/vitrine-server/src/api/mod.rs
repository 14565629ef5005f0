mod categories;
mod featured;
mod search;
mod suggest;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use vitrine_catalog::{CacheLookup, CatalogClient, ImageCache};
use vitrine_core::{AppConfig, Product};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub images: Arc<ImageCache>,
    pub config: Arc<AppConfig>,
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
    catalog: &'static str,
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
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Resolves the `src` a product card should use: the cached data URL when
/// present, the source URL otherwise (including after a failed fetch).
pub(super) fn resolve_image(images: &ImageCache, product: &Product) -> String {
    match images.lookup(&product.image_url) {
        Ok(CacheLookup::Hit(data_url)) => data_url,
        Ok(_) => product.image_url.clone(),
        Err(e) => {
            tracing::warn!(error = %e, url = %product.image_url, "image cache lookup failed");
            product.image_url.clone()
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/suggest", get(suggest::suggest))
        .route("/storefront/search", get(search::search))
        .route("/storefront/featured", get(featured::featured))
        .route("/storefront/categories", get(categories::category_grid))
        .route(
            "/storefront/category-sections",
            get(categories::category_sections),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.catalog.fetch_categories().await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    catalog: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: catalog unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        catalog: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn test_state(base_url: &str) -> AppState {
        let db_path = std::env::temp_dir().join(format!(
            "vitrine-server-test-{}-{}.redb",
            std::process::id(),
            DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        let config = AppConfig {
            env: vitrine_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("valid addr"),
            log_level: "info".to_string(),
            catalog_base_url: base_url.to_string(),
            page_size: 2,
            http_timeout_secs: 5,
            user_agent: "vitrine-test/0.1".to_string(),
            image_cache_path: db_path.clone(),
            image_ttl_secs: 60,
            image_fetch_concurrency: 2,
        };
        AppState {
            catalog: Arc::new(
                CatalogClient::new(base_url, 5, "vitrine-test/0.1").expect("client"),
            ),
            images: Arc::new(ImageCache::open(&db_path, 60).expect("image cache")),
            config: Arc::new(config),
        }
    }

    fn products_fixture() -> serde_json::Value {
        json!([
            {"id": 1, "nome": "Vestido Azul", "preco": "50,00", "imagem": "", "categoria": "Vestidos"},
            {"id": 2, "nome": "Vestido Verde", "preco": "150", "imagem": "", "categoria": "Vestidos",
             "desconto": 30, "oldprice": "214,90"},
            {"id": 3, "nome": "Saia Midi", "preco": "75,90", "imagem": "", "categoria": "Saias",
             "destaque": true}
        ])
    }

    async fn mount_products(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/data/produtos.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(server)
            .await;
    }

    async fn mount_categories(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/data/categorias.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "categorias": [
                    {"nome": "Vestidos", "descricao": "Peças leves"},
                    {"nome": "Saias"}
                ]
            })))
            .mount(server)
            .await;
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn health_reports_ok_when_catalog_is_reachable() {
        let server = MockServer::start().await;
        mount_categories(&server).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(parsed["data"]["status"], "ok");
        assert!(parsed["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn health_degrades_when_catalog_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/categorias.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/api/v1/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(parsed["data"]["catalog"], "unavailable");
    }

    #[tokio::test]
    async fn search_renders_matching_cards_and_pagination() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?q=vestido").await;

        assert_eq!(status, StatusCode::OK);
        // Two matches, page size 2: one full page.
        assert_eq!(body.matches("produto-card").count(), 2);
        assert!(body.contains("1 de 1"));
        assert!(body.contains("promoToggle"));
        assert!(!body.contains("sem-resultados"));
    }

    #[tokio::test]
    async fn search_paginates_past_page_size() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        // Empty query matches all three products; page size is 2.
        let (status, body) = get_body(app, "/storefront/search?page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("produto-card").count(), 1);
        assert!(body.contains("2 de 2"));
        assert!(body.contains("id=\"nextPage\" disabled"));
    }

    #[tokio::test]
    async fn search_zero_matches_shows_no_results_and_disables_toggle() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?q=inexistente").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("sem-resultados"));
        assert!(body.contains("promoToggle\" disabled"));
        assert!(!body.contains("produto-card"));
    }

    #[tokio::test]
    async fn search_price_filter_narrows_results() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?q=vestido&price=0-50").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("produto-card").count(), 1);
        assert!(body.contains("R$ 50,00"));
    }

    #[tokio::test]
    async fn search_category_mode_matches_labels() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?q=Saias&categoria=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("produto-card").count(), 1);
        assert!(body.contains("Saia Midi"));
    }

    #[tokio::test]
    async fn search_rejects_unknown_price_token() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?price=500%2B").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(parsed["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn search_catalog_failure_renders_error_fragment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/produtos.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/search?q=vestido").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("produtos-erro"));
    }

    #[tokio::test]
    async fn featured_renders_only_flagged_products() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/featured").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("produto-card").count(), 1);
        assert!(body.contains("Saia Midi"));
    }

    #[tokio::test]
    async fn featured_with_no_flagged_products_shows_error_fragment() {
        let server = MockServer::start().await;
        mount_products(
            &server,
            json!([{"nome": "Vestido Azul", "preco": "50,00"}]),
        )
        .await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/featured").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("produtos-erro"));
    }

    #[tokio::test]
    async fn category_grid_links_into_category_search() {
        let server = MockServer::start().await;
        mount_categories(&server).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("categoria-card").count(), 2);
        assert!(body.contains("search.html?q=Vestidos&amp;categoria=1"));
    }

    #[tokio::test]
    async fn category_sections_group_products_and_skip_empty() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;
        mount_categories(&server).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/category-sections").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("categoria-section").count(), 2);
        assert!(body.contains("<h2>Vestidos</h2>"));
        assert!(body.contains("Peças leves"));
    }

    #[tokio::test]
    async fn category_sections_failure_renders_categories_error() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;
        Mock::given(method("GET"))
            .and(path("/data/categorias.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/storefront/category-sections").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("categorias-erro"));
    }

    #[tokio::test]
    async fn suggest_returns_ranked_names() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/api/v1/suggest?q=vestido").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        let suggestions = parsed["data"]["suggestions"].as_array().expect("array");
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions
            .iter()
            .all(|s| s.as_str().unwrap().contains("Vestido")));
    }

    #[tokio::test]
    async fn suggest_empty_query_returns_no_suggestions() {
        let server = MockServer::start().await;
        mount_products(&server, products_fixture()).await;

        let app = build_app(test_state(&server.uri()));
        let (status, body) = get_body(app, "/api/v1/suggest").await;

        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(parsed["data"]["suggestions"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn responses_echo_the_request_id_header() {
        let server = MockServer::start().await;
        mount_categories(&server).await;

        let app = build_app(test_state(&server.uri()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().unwrap()),
            Some("req-abc")
        );
    }
}
