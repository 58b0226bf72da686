//! Place-details passthrough endpoint.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use tabemap_places::fields;

use crate::middleware::RequestId;

use super::{upstream_error_response, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct DetailsQuery {
    pub language: Option<String>,
    pub fields: Option<String>,
}

/// GET /api/v1/places/{place_id} — fetch one place's detail record.
///
/// The field mask override is sanitized the same way as the batch route:
/// review content never reaches the upstream request.
pub(in crate::api) async fn get_place_details(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
    Query(query): Query<DetailsQuery>,
) -> Response {
    let rid = &req_id.0;

    let language = query
        .language
        .as_deref()
        .unwrap_or(&state.config.default_language);
    let mask = fields::sanitize_details_mask(query.fields.as_deref());

    match state.client.place_details(&place_id, language, &mask).await {
        Ok(data) => Json(ApiResponse {
            data,
            meta: ResponseMeta::new(rid.clone()),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(place_id, error = %e, "place-details passthrough failed");
            upstream_error_response(rid, &e)
        }
    }
}
