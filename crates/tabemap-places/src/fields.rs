//! Field-mask constants and sanitization.
//!
//! The Places v1 API limits response payloads to the fields named in the
//! `X-Goog-FieldMask` header. Review content is excluded from every details
//! mask as fixed policy — it is large and carries user PII, and no caller
//! override may reintroduce it.

/// Minimal search mask used by the batch resolver: the id is all that is
/// needed to proceed to the detail fetch.
pub const SEARCH_ID_ONLY: &str = "places.id";

/// Default mask for the direct text-search endpoint.
pub const SEARCH_DEFAULT_FIELDS: &str =
    "places.id,places.displayName,places.formattedAddress,places.userRatingCount,places.location";

/// Default mask for place-details calls. Never includes `reviews`.
pub const DETAILS_DEFAULT_FIELDS: &str = "shortFormattedAddress,primaryType,\
primaryTypeDisplayName,rating,userRatingCount,currentOpeningHours.openNow,\
regularOpeningHours.weekdayDescriptions,googleMapsUri,websiteUri,businessStatus";

/// Builds the effective details field mask from an optional caller override.
///
/// Segments are trimmed, empties dropped, and `reviews` (including any
/// `reviews.*` subfield) silently removed. An empty or absent override falls
/// back to [`DETAILS_DEFAULT_FIELDS`], which is already clean.
#[must_use]
pub fn sanitize_details_mask(mask: Option<&str>) -> String {
    let raw = match mask.map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => DETAILS_DEFAULT_FIELDS,
    };

    let mask = raw
        .split(',')
        .map(str::trim)
        .filter(|field| {
            !field.is_empty() && *field != "reviews" && !field.starts_with("reviews.")
        })
        .collect::<Vec<_>>()
        .join(",");

    // An override stripped down to nothing gets the default mask instead of
    // an empty header the upstream would reject.
    if mask.is_empty() {
        DETAILS_DEFAULT_FIELDS.to_string()
    } else {
        mask
    }
}
