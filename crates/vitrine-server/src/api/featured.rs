//! The featured-products fragment for the home and category landing pages.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use vitrine_core::ordering;
use vitrine_render::{render_load_error, render_product_grid};

use super::{resolve_image, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct FeaturedQuery {
    /// `promo=1` orders promotional products first.
    pub promo: Option<String>,
    /// The page's URL hash; promo-flavored hashes enable the ordering too.
    pub hash: Option<String>,
}

pub(super) async fn featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Response {
    let mut products = match state.catalog.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "failed to load catalog for featured view");
            return (StatusCode::BAD_GATEWAY, Html(render_load_error())).into_response();
        }
    };

    ordering::shuffle(&mut products);
    let promo_first = matches!(query.promo.as_deref(), Some("1" | "true"))
        || query
            .hash
            .as_deref()
            .is_some_and(ordering::hash_requests_promotions);
    if promo_first {
        ordering::promos_first(&mut products);
    }

    products.retain(|p| p.is_featured);

    // An empty featured list means the catalog data is broken, not that a
    // search came up dry; show the load-error state.
    if products.is_empty() {
        return Html(render_load_error()).into_response();
    }

    let stats = state
        .images
        .ensure_for_page(
            state.catalog.http(),
            &products,
            state.config.image_fetch_concurrency,
        )
        .await;
    tracing::debug!(
        fetched = stats.fetched,
        failed = stats.failed,
        skipped = stats.skipped,
        "featured image prefetch"
    );

    Html(render_product_grid(&products, |p| {
        resolve_image(&state.images, p)
    }))
    .into_response()
}
