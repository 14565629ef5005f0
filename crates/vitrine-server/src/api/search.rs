//! The search results fragment: match, filter, paginate, render.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use vitrine_core::matcher::{self, MatchMode};
use vitrine_core::{filter, ordering, paginate, PriceFilter, SearchState};
use vitrine_render::{
    render_load_error, render_no_results, render_pagination, render_product_grid,
    render_promo_toggle,
};

use crate::middleware::RequestId;

use super::{resolve_image, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    /// Free-text query; empty or absent matches the whole catalog.
    pub q: Option<String>,
    /// `categoria=1` switches to category-label matching.
    pub categoria: Option<String>,
    /// Price filter token (`all`, `0-50`, ..., `price-desc`).
    pub price: Option<String>,
    /// `promo=1` orders promotional products first.
    pub promo: Option<String>,
    /// The page's URL hash, forwarded so `#promoções`-style links start with
    /// the promo ordering on.
    pub hash: Option<String>,
    pub page: Option<usize>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let price_filter = match query.price.as_deref() {
        None => PriceFilter::All,
        Some(token) => match token.parse::<PriceFilter>() {
            Ok(parsed) => parsed,
            Err(e) => {
                return ApiError::new(req_id.0, "validation_error", e.to_string())
                    .into_response();
            }
        },
    };

    let promo_first = flag_is_set(query.promo.as_deref())
        || query
            .hash
            .as_deref()
            .is_some_and(ordering::hash_requests_promotions);

    // Replay the user's actions onto a fresh state so the reset rules apply
    // in the same order the page fires them: promo toggle first (it clears
    // the price filter), then the filter selection, query, and page jump.
    let mut search_state = SearchState::new(state.config.page_size);
    if promo_first {
        search_state.toggle_promotions(true);
    }
    search_state.select_price_filter(price_filter);
    search_state.submit_query(query.q.as_deref().unwrap_or(""));
    search_state.go_to_page(query.page.unwrap_or(1));

    let mut products = match state.catalog.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "failed to load catalog for search");
            return (StatusCode::BAD_GATEWAY, Html(render_load_error())).into_response();
        }
    };

    ordering::shuffle(&mut products);
    if search_state.promo_first {
        ordering::promos_first(&mut products);
    }

    let mode = if query.categoria.as_deref() == Some("1") {
        MatchMode::Category
    } else {
        MatchMode::Name
    };
    let matches = matcher::search(&products, &search_state.query, mode);
    let filtered = filter::apply(&matches, search_state.price_filter);
    let page = paginate(&filtered, search_state.page, search_state.page_size);

    let stats = state
        .images
        .ensure_for_page(
            state.catalog.http(),
            &page.items,
            state.config.image_fetch_concurrency,
        )
        .await;
    tracing::debug!(
        fetched = stats.fetched,
        failed = stats.failed,
        skipped = stats.skipped,
        "page image prefetch"
    );

    let mut body = String::new();
    if filtered.is_empty() {
        body.push_str(&render_promo_toggle(false, false));
        body.push_str(&render_no_results());
    } else {
        body.push_str(&render_promo_toggle(true, search_state.promo_first));
        body.push_str(&render_product_grid(&page.items, |p| {
            resolve_image(&state.images, p)
        }));
    }
    body.push_str(&render_pagination(&page));

    Html(body).into_response()
}

/// Accepts the `1` and `true` encodings the page emits for checkbox state.
fn flag_is_set(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}
