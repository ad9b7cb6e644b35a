//! Filter engine: pure predicates deciding whether a character belongs to
//! the active search, franchise, role and era selection.
//!
//! Every predicate treats an empty requested value as "no filter". Filtering
//! never reorders: [`apply_filters`] keeps the input order and always builds
//! a fresh vector.

use serde::{Deserialize, Serialize};

use crate::era::title_in_era;
use crate::franchise::{character_names, search_terms};
use crate::role::derive_role;
use crate::types::Character;

/// Local filters applied to the held catalog window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub search: String,
    pub franchise: String,
    pub role: String,
    pub era: String,
}

impl FilterSet {
    /// Whether no filter is enabled.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.franchise.is_empty()
            && self.role.is_empty()
            && self.era.is_empty()
    }
}

/// Case-insensitive substring search over name, every media title and the
/// source reference. Blank terms match everything.
pub fn matches_search(character: &Character, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    let haystack = std::iter::once(character.name.as_str())
        .chain(character.media_titles())
        .chain(character.source_url.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    haystack.contains(&term.to_lowercase())
}

/// A character matches a franchise when a media title contains one of the
/// franchise search terms, or its name contains a configured character token.
pub fn matches_franchise(character: &Character, franchise: &str) -> bool {
    if franchise.is_empty() {
        return true;
    }

    let terms: Vec<String> = search_terms(franchise)
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect();
    let title_match = character.media_titles().any(|title| {
        let title = title.to_lowercase();
        terms.iter().any(|term| title.contains(term.as_str()))
    });
    if title_match {
        return true;
    }

    let name = character.name.to_lowercase();
    character_names(franchise)
        .iter()
        .any(|token| name.contains(&token.to_lowercase()))
}

/// Compare the derived role against the requested role, ignoring case.
pub fn matches_role(character: &Character, role: &str) -> bool {
    role.is_empty() || derive_role(character).matches(role)
}

/// Match the era of the first-listed film. Characters without films never
/// match a non-empty era, whatever other media they appear in.
pub fn matches_era(character: &Character, era: &str) -> bool {
    if era.is_empty() {
        return true;
    }
    character
        .films
        .first()
        .is_some_and(|first| title_in_era(first, era))
}

/// Logical AND of every enabled filter.
pub fn matches_all(character: &Character, filters: &FilterSet) -> bool {
    matches_search(character, &filters.search)
        && matches_franchise(character, &filters.franchise)
        && matches_role(character, &filters.role)
        && matches_era(character, &filters.era)
}

/// Derive the filtered view of `characters`, preserving input order.
pub fn apply_filters(characters: &[Character], filters: &FilterSet) -> Vec<Character> {
    characters
        .iter()
        .filter(|c| matches_all(c, filters))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ariel() -> Character {
        Character::new(1, "Ariel")
            .with_films(["The Little Mermaid"])
            .with_allies(["Flounder"])
            .with_enemies(["Ursula"])
    }

    fn olaf() -> Character {
        Character::new(2, "Olaf")
            .with_films(["Frozen", "Frozen II"])
            .with_allies(["Elsa", "Anna"])
    }

    fn scar() -> Character {
        Character::new(3, "Scar")
            .with_films(["The Lion King"])
            .with_enemies(["Simba"])
    }

    fn mickey() -> Character {
        let mut c = Character::new(4, "Mickey Mouse").with_park_attractions(["Mickey's PhilharMagic"]);
        c.source_url = Some("https://disney.fandom.com/wiki/Mickey_Mouse".into());
        c
    }

    fn catalog() -> Vec<Character> {
        vec![ariel(), olaf(), scar(), mickey()]
    }

    fn filters(search: &str, franchise: &str, role: &str, era: &str) -> FilterSet {
        FilterSet {
            search: search.into(),
            franchise: franchise.into(),
            role: role.into(),
            era: era.into(),
        }
    }

    fn ids(characters: &[Character]) -> Vec<i64> {
        characters.iter().map(|c| c.id).collect()
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn blank_search_matches_everything() {
        assert!(matches_search(&scar(), ""));
        assert!(matches_search(&scar(), "   "));
    }

    #[test]
    fn search_covers_name_titles_and_source() {
        assert!(matches_search(&scar(), "SCAR"));
        assert!(matches_search(&scar(), "lion"));
        assert!(matches_search(&mickey(), "fandom.com"));
        assert!(!matches_search(&scar(), "mermaid"));
    }

    #[test]
    fn search_term_is_trimmed() {
        assert!(matches_search(&olaf(), "  frozen "));
    }

    // -- franchise -----------------------------------------------------------

    #[test]
    fn franchise_matches_media_title_terms() {
        assert!(matches_franchise(&olaf(), "frozen"));
        assert!(matches_franchise(&scar(), "lion-king"));
        assert!(!matches_franchise(&scar(), "frozen"));
    }

    #[test]
    fn franchise_matches_character_name_tokens() {
        let elsa = Character::new(9, "Queen Elsa");
        assert!(matches_franchise(&elsa, "frozen"));
        assert!(!matches_franchise(&elsa, "moana"));
    }

    #[test]
    fn franchise_title_terms_include_tv_shows() {
        let c = Character::new(10, "Flotsam").with_tv_shows(["The Little Mermaid (TV series)"]);
        assert!(matches_franchise(&c, "little-mermaid"));
    }

    #[test]
    fn unknown_franchise_falls_back_to_key_text() {
        let stitch = Character::new(11, "Stitch").with_films(["Lilo and Stitch"]);
        assert!(matches_franchise(&stitch, "lilo-and-stitch"));
        assert!(!matches_franchise(&scar(), "lilo-and-stitch"));
    }

    // -- role / era ----------------------------------------------------------

    #[test]
    fn role_filter_uses_derived_role() {
        assert!(matches_role(&ariel(), "hero"));
        assert!(matches_role(&olaf(), "Sidekick"));
        assert!(matches_role(&scar(), "villain"));
        assert!(!matches_role(&mickey(), "hero"));
        assert!(matches_role(&mickey(), "featured character"));
    }

    #[test]
    fn era_uses_first_title_only() {
        assert!(matches_era(&olaf(), "modern"));
        assert!(matches_era(&scar(), "renaissance"));
        assert!(!matches_era(&scar(), "classic"));
    }

    #[test]
    fn character_without_titles_never_matches_an_era() {
        assert!(!matches_era(&mickey(), "classic"));
        assert!(matches_era(&mickey(), ""));
    }

    #[test]
    fn era_ignores_non_film_media() {
        let flotsam = Character::new(50, "Flotsam").with_tv_shows(["The Little Mermaid (TV series)"]);
        assert!(!matches_era(&flotsam, "renaissance"));
        assert!(matches_era(&flotsam, ""));

        let mut gamer = Character::new(51, "Snowgie");
        gamer.video_games = vec!["Frozen Adventures".into()];
        assert!(!matches_era(&gamer, "modern"));
    }

    // -- composite -----------------------------------------------------------

    #[test]
    fn ariel_hero_little_mermaid_is_included() {
        let f = filters("", "little-mermaid", "hero", "");
        assert!(matches_all(&ariel(), &f));
    }

    #[test]
    fn ariel_era_follows_configured_table() {
        // The Little Mermaid is listed under the renaissance era.
        assert!(matches_all(&ariel(), &filters("", "little-mermaid", "hero", "renaissance")));
        assert!(!matches_all(&ariel(), &filters("", "little-mermaid", "hero", "classic")));
    }

    #[test]
    fn no_filters_keeps_everything_in_order() {
        let out = apply_filters(&catalog(), &FilterSet::default());
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let reversed: Vec<Character> = catalog().into_iter().rev().collect();
        let out = apply_filters(&reversed, &filters("", "", "", "renaissance"));
        assert_eq!(ids(&out), vec![3, 1]);
    }

    #[test]
    fn filtering_twice_is_identical() {
        let f = filters("a", "", "", "");
        let first = apply_filters(&catalog(), &f);
        let second = apply_filters(&catalog(), &f);
        assert_eq!(first, second);
    }

    #[test]
    fn enabling_filters_in_any_order_gives_same_set() {
        let steps = [
            filters("", "frozen", "", ""),
            filters("", "", "sidekick", ""),
            filters("", "", "", "modern"),
        ];
        let expected = apply_filters(&catalog(), &filters("", "frozen", "sidekick", "modern"));
        assert_eq!(ids(&expected), vec![2]);

        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let mut narrowed = catalog();
            for i in order {
                narrowed = apply_filters(&narrowed, &steps[i]);
            }
            assert_eq!(narrowed, expected, "order {order:?}");
        }
    }

    #[test]
    fn filter_set_emptiness_ignores_blank_search() {
        assert!(filters("  ", "", "", "").is_empty());
        assert!(!filters("", "", "hero", "").is_empty());
    }
}
