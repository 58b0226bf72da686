//! Small supporting endpoints for the import UI: supported regions, CSV title
//! extraction, and category icons.

use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};

use tabemap_core::{csv, icons, BiasCircle, BiasRegion};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct RegionInfo {
    pub region: BiasRegion,
    pub bias: BiasCircle,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct CsvTitles {
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct IconsQuery {
    pub primary_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct IconsData {
    pub icons: Vec<&'static str>,
}

/// GET /api/v1/regions — the supported bias regions and their circles.
pub(in crate::api) async fn list_regions(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<RegionInfo>>> {
    let data = BiasRegion::all()
        .into_iter()
        .map(|region| RegionInfo {
            region,
            bias: region.bias(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// POST /api/v1/csv/titles — extract shop titles from an uploaded CSV body.
pub(in crate::api) async fn extract_csv_titles(
    Extension(req_id): Extension<RequestId>,
    body: String,
) -> Json<ApiResponse<CsvTitles>> {
    let titles = csv::parse_titles(&body);
    tracing::debug!(count = titles.len(), "extracted csv titles");

    Json(ApiResponse {
        data: CsvTitles { titles },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// GET /api/v1/icons?primaryType=… — emoji for a place category.
pub(in crate::api) async fn icons_for_type(
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<IconsQuery>,
) -> Json<ApiResponse<IconsData>> {
    let icons = icons::icons_for_primary_type(query.primary_type.as_deref()).to_vec();

    Json(ApiResponse {
        data: IconsData { icons },
        meta: ResponseMeta::new(req_id.0),
    })
}
