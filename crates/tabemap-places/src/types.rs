//! Wire types for the Places v1 API and the resolver's outcome shapes.
//!
//! Detail fields are all optional: the upstream omits anything not named in the
//! field mask. Unknown fields are kept in flattened maps so passthrough
//! endpoints return upstream payloads verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tabemap_core::BiasCircle;

/// Which upstream operation a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    TextSearch,
    PlaceDetails,
    Unknown,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::TextSearch => f.write_str("text-search"),
            Stage::PlaceDetails => f.write_str("place-details"),
            Stage::Unknown => f.write_str("unknown"),
        }
    }
}

/// Body of a `places:searchText` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub text_query: String,
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
}

/// The `locationBias` wrapper the search API expects around a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationBias {
    pub circle: BiasCircle,
}

impl From<BiasCircle> for LocationBias {
    fn from(circle: BiasCircle) -> Self {
        Self { circle }
    }
}

/// One search hit. Only `id` is required to proceed to a detail fetch; any
/// further fields the mask requested ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response envelope of `places:searchText`. An absent array means no match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[serde(other, rename = "BUSINESS_STATUS_UNSPECIFIED")]
    Unspecified,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOpeningHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularOpeningHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_descriptions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Detail record for one place. Every field is optional — presence depends on
/// the requested field mask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_type_display_name: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_opening_hours: Option<CurrentOpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_opening_hours: Option<RegularOpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_status: Option<BusinessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful outcome for one input name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub name: String,
    pub place_id: String,
    /// The raw search hit, carried through for the caller.
    pub text_search: Candidate,
    pub details: PlaceDetails,
}

/// Failed outcome for one input name. `details` is present only for upstream
/// failures, where it carries the HTTP status and response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveFailure {
    pub name: String,
    pub message: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_status_round_trips_known_values() {
        let status: BusinessStatus = serde_json::from_str("\"OPERATIONAL\"").expect("parse");
        assert_eq!(status, BusinessStatus::Operational);
        assert_eq!(
            serde_json::to_string(&BusinessStatus::ClosedTemporarily).expect("serialize"),
            "\"CLOSED_TEMPORARILY\""
        );
    }

    #[test]
    fn unknown_business_status_parses_as_unspecified() {
        let status: BusinessStatus =
            serde_json::from_str("\"SOMETHING_NEW\"").expect("parse should not fail");
        assert_eq!(status, BusinessStatus::Unspecified);
    }

    #[test]
    fn stage_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Stage::TextSearch).expect("serialize"),
            "\"text-search\""
        );
        assert_eq!(
            serde_json::to_string(&Stage::PlaceDetails).expect("serialize"),
            "\"place-details\""
        );
    }

    #[test]
    fn place_details_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "displayName": {"text": "Cafe A"},
            "businessStatus": "OPERATIONAL",
            "internationalPhoneNumber": "+81 92-000-0000"
        });
        let details: PlaceDetails = serde_json::from_value(raw.clone()).expect("parse");
        assert_eq!(
            details.display_name.as_ref().and_then(|n| n.text.as_deref()),
            Some("Cafe A")
        );
        assert_eq!(details.business_status, Some(BusinessStatus::Operational));
        assert_eq!(
            serde_json::to_value(&details).expect("serialize"),
            raw,
            "unrequested fields must round-trip verbatim"
        );
    }

    #[test]
    fn search_request_omits_absent_options() {
        let request = SearchRequest {
            text_query: "ramen".to_string(),
            language_code: "ja".to_string(),
            page_size: Some(1),
            page_token: None,
            location_bias: None,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"textQuery": "ramen", "languageCode": "ja", "pageSize": 1})
        );
    }

    #[test]
    fn resolve_failure_omits_absent_details() {
        let failure = ResolveFailure {
            name: "Cafe B".to_string(),
            message: "No place found".to_string(),
            stage: Stage::TextSearch,
            details: None,
        };
        let value = serde_json::to_value(&failure).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"name": "Cafe B", "message": "No place found", "stage": "text-search"})
        );
    }
}
