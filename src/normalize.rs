//! Model-output normalization.
//!
//! Vision models frequently wrap their JSON answer in a Markdown code
//! fence. This module strips that wrapping, parses the payload into
//! timecards, and assigns default names to unnamed cards.

use thiserror::Error;

use crate::models::Timecard;

const FENCE_PREFIX: &str = "```json";
const FENCE_SUFFIX: &str = "```";

/// Errors from normalizing raw model output.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The text was not a valid JSON list of timecards even after
    /// fence-stripping. Keeps the raw text so the caller can log it,
    /// show it for manual correction, or retry extraction.
    #[error("model output is not a valid timecard list: {source}")]
    MalformedModelOutput {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

impl NormalizeError {
    /// The raw model text that failed to parse.
    pub fn raw_text(&self) -> &str {
        match self {
            NormalizeError::MalformedModelOutput { raw, .. } => raw,
        }
    }
}

/// Strip a leading ```` ```json ```` marker and a trailing ```` ``` ````
/// marker when present at the very start/end of the trimmed text.
///
/// Exact prefix/suffix trim only; fence markers elsewhere in the text
/// are left alone.
pub fn strip_json_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE_PREFIX) {
        text = rest.trim();
    }
    if let Some(rest) = text.strip_suffix(FENCE_SUFFIX) {
        text = rest.trim();
    }
    text
}

/// Parse raw model text into a list of timecards.
///
/// Unnamed cards get "Timecard N" names, 1-based in order of
/// appearance. Deep schema checks are left to enrichment: a card
/// without `days` is simply empty here.
pub fn parse_timecards(raw: &str) -> Result<Vec<Timecard>, NormalizeError> {
    let stripped = strip_json_fence(raw);

    let mut cards: Vec<Timecard> =
        serde_json::from_str(stripped).map_err(|source| NormalizeError::MalformedModelOutput {
            source,
            raw: raw.to_string(),
        })?;

    for (i, card) in cards.iter_mut().enumerate() {
        if card.name.trim().is_empty() {
            card.name = format!("Timecard {}", i + 1);
        }
    }

    Ok(cards)
}
