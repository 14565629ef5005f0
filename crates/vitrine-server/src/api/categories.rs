//! Category grid and per-category product sections.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use vitrine_core::ordering;
use vitrine_render::{render_categories_error, render_category_grid, render_category_sections};

use super::{resolve_image, AppState};

pub(super) async fn category_grid(State(state): State<AppState>) -> Response {
    match state.catalog.fetch_categories().await {
        Ok(categories) => Html(render_category_grid(&categories)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load categories");
            (StatusCode::BAD_GATEWAY, Html(render_categories_error())).into_response()
        }
    }
}

pub(super) async fn category_sections(State(state): State<AppState>) -> Response {
    let categories = match state.catalog.fetch_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "failed to load categories for sections");
            return (StatusCode::BAD_GATEWAY, Html(render_categories_error())).into_response();
        }
    };

    let mut products = match state.catalog.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "failed to load catalog for sections");
            return (StatusCode::BAD_GATEWAY, Html(render_categories_error())).into_response();
        }
    };

    ordering::shuffle(&mut products);

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
        "section image prefetch"
    );

    Html(render_category_sections(&categories, &products, |p| {
        resolve_image(&state.images, p)
    }))
    .into_response()
}
