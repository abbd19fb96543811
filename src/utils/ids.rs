//! Comma-delimited identifier lists carried in a single route segment.
//!
//! `decode` is all-or-nothing: one malformed segment fails the whole batch.
//! `decode(encode(ids)) == ids` for every non-empty list.

use thiserror::Error;
use uuid::Uuid;

const SEPARATOR: char = ',';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdListError {
    #[error("'{segment}' is not a valid identifier")]
    Malformed { segment: String },
}

/// Parse `raw` into identifiers. Missing or blank input is `Ok(None)`.
pub fn decode(raw: Option<&str>) -> Result<Option<Vec<Uuid>>, IdListError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };

    raw.split(SEPARATOR)
        .map(str::trim)
        .map(|segment| {
            Uuid::parse_str(segment).map_err(|_| IdListError::Malformed {
                segment: segment.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Join identifiers in canonical hyphenated form.
pub fn encode(ids: &[Uuid]) -> String {
    ids.iter()
        .map(|id| id.hyphenated().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a route segment, accepting an optional `( ... )` wrapper.
pub fn from_route_segment(segment: &str) -> Result<Option<Vec<Uuid>>, IdListError> {
    let trimmed = segment.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    decode(Some(inner))
}

/// Route segment used in `Location` headers for batch resources.
pub fn to_route_segment(ids: &[Uuid]) -> String {
    format!("({})", encode(ids))
}
