//! Completion extraction: fence stripping, JSON parsing, schema validation.
//!
//! # Fence grammar
//!
//! ```text
//! completion := prose? OPEN body CLOSE? rest?
//! OPEN       := "```json"          (tagged)
//!             | "```"              (generic, only when no tagged marker exists)
//! CLOSE      := "```"              (first occurrence after OPEN)
//! ```
//!
//! Only the first opening marker counts. A missing closing marker means the
//! body runs to the end of the completion. Fences are not nested: the first
//! closing marker after the opening one ends the body. The body is trimmed.

use crate::error::AnalysisError;
use crate::sentiment::{KeywordBounds, SentimentResult};

const FENCE: &str = "```";

/// Which opening marker was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    /// "```json"
    Json,
    /// "```" with no language tag recognised
    Generic,
}

impl FenceKind {
    fn opening(self) -> &'static str {
        match self {
            FenceKind::Json => "```json",
            FenceKind::Generic => FENCE,
        }
    }
}

/// Result of fence stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// Text to hand to the JSON parser, trimmed
    pub body: &'a str,
    /// The fence the body came from, if any
    pub fence: Option<FenceKind>,
    /// False when the opening marker had no matching close
    pub closed: bool,
}

/// Locate the relevant fenced block in a completion.
pub fn strip_fences(completion: &str) -> Stripped<'_> {
    let located = [FenceKind::Json, FenceKind::Generic]
        .into_iter()
        .find_map(|kind| completion.find(kind.opening()).map(|at| (kind, at)));

    let Some((kind, at)) = located else {
        return Stripped {
            body: completion.trim(),
            fence: None,
            closed: false,
        };
    };

    let after_open = &completion[at + kind.opening().len()..];

    let (body, closed) = match after_open.find(FENCE) {
        Some(end) => (&after_open[..end], true),
        None => (after_open, false),
    };

    Stripped {
        body: body.trim(),
        fence: Some(kind),
        closed,
    }
}

/// Parse a completion into a JSON value after fence stripping.
pub fn extract_json(completion: &str) -> Result<serde_json::Value, AnalysisError> {
    let stripped = strip_fences(completion);

    if stripped.fence.is_some() && !stripped.closed {
        tracing::debug!(fence = ?stripped.fence, "Fence has no closing marker, using remainder");
    }

    serde_json::from_str(stripped.body).map_err(AnalysisError::Extraction)
}

/// Run the full pipeline: strip, parse, validate.
pub fn parse_completion(
    completion: &str,
    bounds: KeywordBounds,
) -> Result<SentimentResult, AnalysisError> {
    let value = extract_json(completion)?;
    SentimentResult::from_value(value, bounds)
}
