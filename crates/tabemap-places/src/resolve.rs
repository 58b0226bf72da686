//! Per-item resolver and windowed batch orchestrator.
//!
//! [`resolve_one`] composes search + detail fetch for one name and converts
//! every failure path into a [`ResolveFailure`] value — nothing propagates.
//! [`resolve_all`] fans out over the input in fixed-size windows: all items in
//! a window run concurrently, the window is awaited to full settlement, and
//! only then does the next window dispatch. Peak concurrent upstream calls are
//! therefore bounded by the window size.

use std::future::Future;

use futures::future;
use serde::Serialize;
use serde_json::json;

use tabemap_core::BiasRegion;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{ResolveFailure, ResolvedPlace, Stage};

/// Partitioned outcome of a batch run. Every input name lands in exactly one
/// of the two lists; `results.len() + errors.len()` equals the input length.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ResolvedPlace>,
    pub errors: Vec<ResolveFailure>,
}

/// Resolves one name: text search, then detail fetch for the best candidate.
///
/// Never propagates a fault. Failure paths:
/// - search upstream failure → `text-search` stage, status + body in details;
/// - search succeeded but no candidate (or candidate without id) →
///   `"No place found"` at `text-search`, no details;
/// - detail upstream failure → `place-details` stage;
/// - anything unclassified (bad body, local fault) → `unknown` stage.
pub async fn resolve_one(
    client: &PlacesClient,
    name: &str,
    language_code: &str,
    region: BiasRegion,
    details_mask: &str,
) -> Result<ResolvedPlace, ResolveFailure> {
    let candidate = client
        .find_candidate(name, language_code, region)
        .await
        .map_err(|e| failure_for(name, &e))?;

    let Some(candidate) = candidate.filter(|c| c.id.as_deref().is_some_and(|id| !id.is_empty()))
    else {
        return Err(ResolveFailure {
            name: name.to_owned(),
            message: "No place found".to_string(),
            stage: Stage::TextSearch,
            details: None,
        });
    };

    // Guarded by the filter above.
    let place_id = candidate.id.clone().unwrap_or_default();

    let details = client
        .place_details(&place_id, language_code, details_mask)
        .await
        .map_err(|e| failure_for(name, &e))?;

    Ok(ResolvedPlace {
        name: name.to_owned(),
        place_id,
        text_search: candidate,
        details,
    })
}

/// Resolves a list of names with bounded concurrency.
///
/// Names are split into consecutive windows of `batch_size` (minimum 1; the
/// last window may be shorter). Windows run strictly sequentially; items
/// within a window race. Outcome order is deterministic: windows in input
/// order, input order within each window. An empty input returns immediately
/// without any upstream call.
pub async fn resolve_all(
    client: &PlacesClient,
    names: &[String],
    batch_size: usize,
    language_code: &str,
    region: BiasRegion,
    details_mask: &str,
) -> BatchOutcome {
    if names.is_empty() {
        return BatchOutcome::default();
    }

    let settled = process_in_windows(names.to_vec(), batch_size, |name| async move {
        resolve_one(client, &name, language_code, region, details_mask).await
    })
    .await;

    let mut outcome = BatchOutcome::default();
    for item in settled {
        match item {
            Ok(resolved) => outcome.results.push(resolved),
            Err(failure) => outcome.errors.push(failure),
        }
    }

    if outcome.errors.is_empty() {
        tracing::info!(resolved = outcome.results.len(), "batch resolution complete");
    } else {
        tracing::warn!(
            resolved = outcome.results.len(),
            failed = outcome.errors.len(),
            "batch resolution complete with failures"
        );
    }

    outcome
}

fn failure_for(name: &str, error: &PlacesError) -> ResolveFailure {
    let details = match error {
        PlacesError::Upstream {
            status, details, ..
        } => Some(json!({ "status": status, "body": details })),
        _ => None,
    };
    ResolveFailure {
        name: name.to_owned(),
        message: error.to_string(),
        stage: error.stage(),
        details,
    }
}

/// Runs `handle` over `items` in consecutive windows of `window_size`,
/// awaiting each window to full settlement before dispatching the next.
/// Output order matches input order.
async fn process_in_windows<T, R, F, Fut>(items: Vec<T>, window_size: usize, handle: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let window_size = window_size.max(1);
    let mut outcomes = Vec::with_capacity(items.len());

    let mut remaining = items;
    while !remaining.is_empty() {
        let rest = remaining.split_off(window_size.min(remaining.len()));
        let window = std::mem::replace(&mut remaining, rest);
        let settled = future::join_all(window.into_iter().map(&handle)).await;
        outcomes.extend(settled);
    }

    outcomes
}
