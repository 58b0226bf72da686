//! POST /api/v1/resolve — the name-to-detail batch endpoint.
//!
//! Validates input before any upstream call, then hands the list to the
//! windowed resolver. Once validation passes the reply is always 200: partial
//! failure is data in `errors`, not a status code.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use tabemap_core::BiasRegion;
use tabemap_places::{fields, resolve_all, BatchOutcome};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct ResolveRequest {
    pub names: Vec<String>,
    pub region: String,
    pub language: Option<String>,
    pub details_fields: Option<String>,
}

fn validate_names(req_id: &str, names: &[String]) -> Result<(), ApiError> {
    if names.is_empty() {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "names must be a non-empty array of strings",
        ));
    }
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "names must not contain blank entries",
        ));
    }
    Ok(())
}

fn parse_region(req_id: &str, raw: &str) -> Result<BiasRegion, ApiError> {
    raw.parse::<BiasRegion>()
        .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))
}

/// POST /api/v1/resolve — resolve a list of names to place details.
pub(in crate::api) async fn resolve_names(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<BatchOutcome>>, ApiError> {
    let rid = &req_id.0;

    validate_names(rid, &body.names)?;
    let region = parse_region(rid, &body.region)?;

    let language = body
        .language
        .as_deref()
        .unwrap_or(&state.config.default_language);
    // `reviews` can never reach the upstream, regardless of override.
    let details_mask = fields::sanitize_details_mask(body.details_fields.as_deref());

    tracing::info!(
        count = body.names.len(),
        region = %region,
        batch_size = state.config.resolve_batch_size,
        "resolving name batch"
    );

    let outcome = resolve_all(
        &state.client,
        &body.names,
        state.config.resolve_batch_size,
        language,
        region,
        &details_mask,
    )
    .await;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(rid.clone()),
    }))
}
