//! Query state value and its canonical, shareable encoding.
//!
//! The canonical representation is a URL query string with the keys
//! `search`, `franchise`, `role`, `era` and `page`. A key is present only
//! when its field differs from the default, so the default state encodes to
//! the empty string.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::CoreError;
use crate::filter::FilterSet;

pub const KEY_SEARCH: &str = "search";
pub const KEY_FRANCHISE: &str = "franchise";
pub const KEY_ROLE: &str = "role";
pub const KEY_ERA: &str = "era";
pub const KEY_PAGE: &str = "page";

/// First page number; pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// The active search, filter and page selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryState {
    pub search: String,
    pub franchise: String,
    pub role: String,
    pub era: String,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            franchise: String::new(),
            role: String::new(),
            era: String::new(),
            page: FIRST_PAGE,
        }
    }
}

/// A partial update: every `Some` field replaces the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPatch {
    pub search: Option<String>,
    pub franchise: Option<String>,
    pub role: Option<String>,
    pub era: Option<String>,
    pub page: Option<u32>,
}

impl QueryPatch {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// A committed search always restarts pagination.
    pub fn committed_search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            page: Some(FIRST_PAGE),
            ..Self::default()
        }
    }

    pub fn with_franchise(mut self, value: impl Into<String>) -> Self {
        self.franchise = Some(value.into());
        self
    }

    pub fn with_role(mut self, value: impl Into<String>) -> Self {
        self.role = Some(value.into());
        self
    }

    pub fn with_era(mut self, value: impl Into<String>) -> Self {
        self.era = Some(value.into());
        self
    }

    /// Reject patches that would break the `page >= 1` invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page == Some(0) {
            return Err(CoreError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl QueryState {
    /// Merge `patch` over this state. Omitted fields keep their value.
    pub fn apply(&self, patch: &QueryPatch) -> QueryState {
        QueryState {
            search: patch.search.clone().unwrap_or_else(|| self.search.clone()),
            franchise: patch
                .franchise
                .clone()
                .unwrap_or_else(|| self.franchise.clone()),
            role: patch.role.clone().unwrap_or_else(|| self.role.clone()),
            era: patch.era.clone().unwrap_or_else(|| self.era.clone()),
            page: patch.page.unwrap_or(self.page).max(FIRST_PAGE),
        }
    }

    /// The local filters (everything except pagination).
    pub fn filters(&self) -> FilterSet {
        FilterSet {
            search: self.search.clone(),
            franchise: self.franchise.clone(),
            role: self.role.clone(),
            era: self.era.clone(),
        }
    }

    /// Trimmed search text, `None` when blank.
    pub fn search_text(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn next_page(&self) -> QueryPatch {
        QueryPatch::page(self.page.saturating_add(1))
    }

    pub fn prev_page(&self) -> QueryPatch {
        QueryPatch::page(self.page.saturating_sub(1).max(FIRST_PAGE))
    }

    /// Encode into the canonical query string (no leading `?`).
    ///
    /// Blank text fields and page 1 are omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            (KEY_SEARCH, &self.search),
            (KEY_FRANCHISE, &self.franchise),
            (KEY_ROLE, &self.role),
            (KEY_ERA, &self.era),
        ] {
            if !value.trim().is_empty() {
                serializer.append_pair(key, value);
            }
        }
        if self.page != FIRST_PAGE {
            serializer.append_pair(KEY_PAGE, &self.page.to_string());
        }
        serializer.finish()
    }

    /// Decode a canonical query string. Never fails.
    ///
    /// A leading `?` is ignored, missing keys take their default, the first
    /// occurrence of a repeated key wins, and a `page` that is not a
    /// positive integer falls back to 1.
    pub fn from_query_string(query: &str) -> QueryState {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = QueryState::default();
        let mut seen_page = false;
        let mut seen = [false; 4];

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                KEY_SEARCH => Some((0, &mut state.search)),
                KEY_FRANCHISE => Some((1, &mut state.franchise)),
                KEY_ROLE => Some((2, &mut state.role)),
                KEY_ERA => Some((3, &mut state.era)),
                KEY_PAGE => {
                    if !seen_page {
                        seen_page = true;
                        state.page = parse_page(&value);
                    }
                    None
                }
                _ => None,
            };
            if let Some((index, field)) = slot {
                if !seen[index] {
                    seen[index] = true;
                    *field = value.into_owned();
                }
            }
        }

        state
    }

    /// Number of keys present in the canonical encoding.
    pub fn encoded_key_count(&self) -> usize {
        let query = self.to_query_string();
        form_urlencoded::parse(query.as_bytes()).count()
    }
}

fn parse_page(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= FIRST_PAGE => page,
        _ => FIRST_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryState {
        QueryState {
            search: "mermaid".into(),
            franchise: "little-mermaid".into(),
            role: "hero".into(),
            era: "renaissance".into(),
            page: 4,
        }
    }

    // -- apply ---------------------------------------------------------------

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let before = sample();
        let after = before.apply(&QueryPatch::default().with_role("villain"));

        assert_eq!(after.role, "villain");
        assert_eq!(after.search, before.search);
        assert_eq!(after.franchise, before.franchise);
        assert_eq!(after.era, before.era);
        assert_eq!(after.page, before.page);
    }

    #[test]
    fn committed_search_resets_page() {
        let after = sample().apply(&QueryPatch::committed_search("olaf"));
        assert_eq!(after.search, "olaf");
        assert_eq!(after.page, 1);
    }

    #[test]
    fn zero_page_patch_is_invalid() {
        assert!(QueryPatch::page(0).validate().is_err());
        assert!(QueryPatch::page(2).validate().is_ok());
    }

    #[test]
    fn prev_page_never_goes_below_one() {
        let state = QueryState::default();
        assert_eq!(state.prev_page().page, Some(1));
        assert_eq!(state.next_page().page, Some(2));
    }

    // -- encoding ------------------------------------------------------------

    #[test]
    fn default_state_encodes_to_nothing() {
        let state = QueryState::default();
        assert_eq!(state.to_query_string(), "");
        assert_eq!(state.encoded_key_count(), 0);
        assert_eq!(QueryState::from_query_string(""), state);
    }

    #[test]
    fn page_only_state_encodes_only_page() {
        let state = QueryState {
            page: 3,
            ..QueryState::default()
        };
        assert_eq!(state.to_query_string(), "page=3");
    }

    #[test]
    fn blank_search_is_not_persisted() {
        let state = QueryState {
            search: "   ".into(),
            ..QueryState::default()
        };
        assert_eq!(state.to_query_string(), "");
    }

    #[test]
    fn encode_then_decode_restores_non_default_fields() {
        let state = QueryState {
            search: "beauty & beast".into(),
            ..sample()
        };
        let decoded = QueryState::from_query_string(&state.to_query_string());
        assert_eq!(decoded, state);
    }

    // -- decoding ------------------------------------------------------------

    #[test]
    fn malformed_page_degrades_to_first_page() {
        for raw in ["page=abc", "page=0", "page=-2", "page=", "page=3.5"] {
            assert_eq!(QueryState::from_query_string(raw).page, 1, "{raw}");
        }
    }

    #[test]
    fn leading_question_mark_and_unknown_keys_are_ignored() {
        let state = QueryState::from_query_string("?era=modern&sort=name&page=2");
        assert_eq!(state.era, "modern");
        assert_eq!(state.page, 2);
        assert_eq!(state.search, "");
    }

    #[test]
    fn first_occurrence_of_repeated_key_wins() {
        let state = QueryState::from_query_string("role=hero&role=villain&page=2&page=9");
        assert_eq!(state.role, "hero");
        assert_eq!(state.page, 2);
    }

    #[test]
    fn percent_encoded_values_are_decoded() {
        let state = QueryState::from_query_string("search=toy%20story&franchise=toy-story");
        assert_eq!(state.search, "toy story");
        assert_eq!(state.franchise, "toy-story");
    }
}
