//! Display phase of the product listing.

use serde::Serialize;

/// Why a search ended without products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The store answered with zero matches.
    NoMatches,
    /// The store call failed.
    Failed(String),
}

/// Where the listing is in its load/search cycle.
///
/// `Loading` → `Idle` → `Debouncing` → `Searching(q)` →
/// `Results(q)` | `NotFound(q)` | `Idle`. `Unavailable` replaces `Idle`
/// when the initial list could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SearchPhase {
    /// The full product list is being fetched.
    Loading,
    /// Showing the full cached list.
    Idle,
    /// The full list could not be fetched.
    Unavailable { reason: String },
    /// Input changed; waiting for it to settle.
    Debouncing { pending: String },
    /// A search for `query` is in flight.
    Searching { query: String },
    /// Showing the matches for `query`.
    Results { query: String },
    /// `query` produced nothing to show.
    NotFound { query: String, reason: NotFoundReason },
}

impl SearchPhase {
    /// Whether a spinner should be shown.
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchPhase::Loading | SearchPhase::Searching { .. })
    }

    /// The query this phase belongs to, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchPhase::Searching { query }
            | SearchPhase::Results { query }
            | SearchPhase::NotFound { query, .. } => Some(query),
            SearchPhase::Debouncing { pending } => Some(pending),
            _ => None,
        }
    }

    /// Placeholder text shown instead of rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchPhase::NotFound { .. } => Some("No products found"),
            SearchPhase::Unavailable { .. } => Some("Products could not be loaded"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_for_both_reasons() {
        for reason in [NotFoundReason::NoMatches, NotFoundReason::Failed("boom".into())] {
            let phase = SearchPhase::NotFound {
                query: "aspirin".into(),
                reason,
            };
            assert_eq!(phase.message(), Some("No products found"));
            assert!(!phase.is_loading());
            assert_eq!(phase.query(), Some("aspirin"));
        }
    }

    #[test]
    fn test_loading_phases() {
        assert!(SearchPhase::Loading.is_loading());
        assert!(SearchPhase::Searching { query: "a".into() }.is_loading());
        assert!(!SearchPhase::Idle.is_loading());
        assert_eq!(SearchPhase::Idle.message(), None);
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(SearchPhase::Results { query: "zinc".into() }).unwrap();
        assert_eq!(json["phase"], "results");
        assert_eq!(json["query"], "zinc");
    }
}
