//! Franchise membership tables.
//!
//! A character belongs to a franchise when one of its media titles contains
//! a franchise search term, or when its name contains one of the franchise's
//! well-known character tokens.

use crate::options::{option, FilterOption};

pub const FRANCHISE_OPTIONS: &[FilterOption] = &[
    option("", "All Franchises"),
    option("frozen", "Frozen"),
    option("toy-story", "Toy Story"),
    option("lion-king", "The Lion King"),
    option("moana", "Moana"),
    option("aladdin", "Aladdin"),
    option("beauty-and-the-beast", "Beauty and the Beast"),
    option("hercules", "Hercules"),
    option("little-mermaid", "The Little Mermaid"),
];

/// Media-title fragments per franchise key.
const FRANCHISE_SEARCH_TERMS: &[(&str, &[&str])] = &[
    ("frozen", &["frozen", "frost", "arendelle"]),
    ("toy-story", &["toy story"]),
    ("lion-king", &["lion king"]),
    ("moana", &["moana"]),
    ("aladdin", &["aladdin"]),
    ("beauty-and-the-beast", &["beauty and the beast"]),
    ("hercules", &["hercules"]),
    ("little-mermaid", &["little mermaid", "ariel"]),
];

/// Character-name tokens per franchise key.
const FRANCHISE_CHARACTER_NAMES: &[(&str, &[&str])] = &[
    ("frozen", &["elsa", "anna", "olaf", "kristoff"]),
    ("little-mermaid", &["ariel", "sebastian", "flounder"]),
];

/// Search terms for a franchise key.
///
/// Unknown keys fall back to the key itself with hyphens turned into spaces.
pub fn search_terms(franchise: &str) -> Vec<String> {
    match lookup(FRANCHISE_SEARCH_TERMS, franchise) {
        Some(terms) => terms.iter().map(|t| (*t).to_string()).collect(),
        None => vec![franchise.replace('-', " ")],
    }
}

/// Character-name tokens configured for a franchise key, if any.
pub fn character_names(franchise: &str) -> &'static [&'static str] {
    lookup(FRANCHISE_CHARACTER_NAMES, franchise).unwrap_or(&[])
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, values)| *values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_franchise_uses_configured_terms() {
        assert_eq!(search_terms("frozen"), vec!["frozen", "frost", "arendelle"]);
    }

    #[test]
    fn unknown_franchise_falls_back_to_key() {
        assert_eq!(search_terms("lilo-and-stitch"), vec!["lilo and stitch"]);
    }

    #[test]
    fn character_names_only_for_configured_franchises() {
        assert_eq!(character_names("little-mermaid"), &["ariel", "sebastian", "flounder"]);
        assert!(character_names("moana").is_empty());
    }

    #[test]
    fn every_option_has_search_terms() {
        for opt in FRANCHISE_OPTIONS.iter().filter(|o| !o.value.is_empty()) {
            assert!(
                lookup(FRANCHISE_SEARCH_TERMS, opt.value).is_some(),
                "missing terms for {}",
                opt.value
            );
        }
    }
}
