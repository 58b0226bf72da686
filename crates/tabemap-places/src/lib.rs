//! Google Places (v1) client and the name-to-detail batch resolver.
//!
//! Three layers: [`PlacesClient`] owns request construction, field masks, and
//! upstream error classification; [`resolve_one`] composes search + detail
//! fetch for a single name and never propagates a failure; [`resolve_all`]
//! fans out over a name list in fixed-size concurrency windows and partitions
//! the outcomes for the caller.

mod client;
mod error;
pub mod fields;
mod resolve;
mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use resolve::{resolve_all, resolve_one, BatchOutcome};
pub use types::{
    BusinessStatus, Candidate, CurrentOpeningHours, LocalizedText, LocationBias, PlaceDetails,
    RegularOpeningHours, ResolveFailure, ResolvedPlace, SearchRequest, SearchResponse, Stage,
};
