//! Quick-search suggestions for the header search box.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use vitrine_core::matcher;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SuggestData {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SuggestQuery {
    pub q: Option<String>,
}

pub(super) async fn suggest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<ApiResponse<SuggestData>>, ApiError> {
    let products = state.catalog.fetch_products().await.map_err(|e| {
        tracing::error!(error = %e, "failed to load catalog for suggestions");
        ApiError::new(req_id.0.clone(), "upstream_error", "failed to load catalog")
    })?;

    let suggestions = matcher::rank_suggestions(&products, query.q.as_deref().unwrap_or(""));

    Ok(Json(ApiResponse {
        data: SuggestData { suggestions },
        meta: ResponseMeta::new(req_id.0),
    }))
}
