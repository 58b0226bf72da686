//! Text-search passthrough endpoints.
//!
//! Thin proxy over `places:searchText` for direct UI queries: clamps the page
//! size, resolves a named region or an explicit bias circle, and mirrors
//! upstream failures back with their original status.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use tabemap_core::{BiasCircle, BiasRegion, LatLng};
use tabemap_places::{fields, LocationBias, SearchRequest};

use crate::middleware::RequestId;

use super::{upstream_error_response, ApiError, ApiResponse, AppState, ResponseMeta};

/// Upstream caps text-search pages at 20 results.
const MAX_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchBody {
    pub text_query: String,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
    pub language_code: Option<String>,
    pub region: Option<String>,
    pub location_bias: Option<LocationBias>,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct FieldsQuery {
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchGetQuery {
    pub q: Option<String>,
    pub language: Option<String>,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub fields: Option<String>,
}

fn effective_search_mask(fields_param: Option<&str>) -> String {
    match fields_param.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => fields::SEARCH_DEFAULT_FIELDS.to_string(),
    }
}

fn resolve_bias(
    req_id: &str,
    region: Option<&str>,
    explicit: Option<LocationBias>,
) -> Result<Option<LocationBias>, ApiError> {
    if let Some(raw) = region {
        let region = raw
            .parse::<BiasRegion>()
            .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))?;
        return Ok(Some(region.bias().into()));
    }
    Ok(explicit)
}

async fn run_search(
    state: &AppState,
    rid: &str,
    request: &SearchRequest,
    field_mask: &str,
) -> Response {
    match state.client.search_text(request, field_mask).await {
        Ok(data) => Json(ApiResponse {
            data,
            meta: ResponseMeta::new(rid.to_string()),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "text-search passthrough failed");
            upstream_error_response(rid, &e)
        }
    }
}

/// POST /api/v1/search — direct text search against the Places API.
pub(in crate::api) async fn search_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FieldsQuery>,
    Json(body): Json<SearchBody>,
) -> Response {
    let rid = &req_id.0;

    if body.text_query.trim().is_empty() {
        return ApiError::new(rid, "validation_error", "textQuery must not be blank")
            .into_response();
    }

    let location_bias = match resolve_bias(rid, body.region.as_deref(), body.location_bias) {
        Ok(bias) => bias,
        Err(e) => return e.into_response(),
    };

    let request = SearchRequest {
        text_query: body.text_query,
        language_code: body
            .language_code
            .unwrap_or_else(|| state.config.default_language.clone()),
        page_size: body.page_size.map(|p| p.clamp(1, MAX_PAGE_SIZE)),
        page_token: body.page_token,
        location_bias,
    };

    let mask = effective_search_mask(query.fields.as_deref());
    run_search(&state, rid, &request, &mask).await
}

/// GET /api/v1/search — convenience variant building the POST payload from
/// query parameters. A bias circle applies only when lat, lng, and radius are
/// all present and finite.
pub(in crate::api) async fn search_get(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchGetQuery>,
) -> Response {
    let rid = &req_id.0;

    let Some(text_query) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return ApiError::new(rid, "validation_error", "missing required query parameter: q")
            .into_response();
    };

    let location_bias = match (query.lat, query.lng, query.radius) {
        (Some(lat), Some(lng), Some(radius))
            if lat.is_finite() && lng.is_finite() && radius.is_finite() =>
        {
            Some(LocationBias {
                circle: BiasCircle {
                    center: LatLng {
                        latitude: lat,
                        longitude: lng,
                    },
                    radius,
                },
            })
        }
        _ => None,
    };

    let request = SearchRequest {
        text_query: text_query.to_string(),
        language_code: query
            .language
            .unwrap_or_else(|| state.config.default_language.clone()),
        page_size: query.page_size.map(|p| p.clamp(1, MAX_PAGE_SIZE)),
        page_token: query.page_token,
        location_bias,
    };

    let mask = effective_search_mask(query.fields.as_deref());
    run_search(&state, rid, &request, &mask).await
}
