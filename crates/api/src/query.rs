//! Shared query parameter types for API handlers.

use drivesafe_core::search::{clamp_limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use serde::Deserialize;

/// `?limit=` for the recent-window endpoints.
///
/// The query string is kept as raw key/value pairs so that no shape of
/// `limit` (malformed, repeated) can reject the request. The first `limit`
/// wins.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LimitParams(Vec<(String, String)>);

impl LimitParams {
    /// The effective limit after defaulting and clamping.
    pub fn resolve(&self) -> i64 {
        let raw = self
            .0
            .iter()
            .find(|(key, _)| key == "limit")
            .map(|(_, value)| value.as_str());
        clamp_limit(raw, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }
}
