//! Era classification.
//!
//! An era is never stored on a record. It is derived from the record's
//! first-listed film, matched against a fixed table of canonical
//! title fragments per era.

use crate::options::{option, FilterOption};
use crate::types::Character;

pub const ERA_CLASSIC: &str = "classic";
pub const ERA_RENAISSANCE: &str = "renaissance";
pub const ERA_MODERN: &str = "modern";

pub const ERA_OPTIONS: &[FilterOption] = &[
    option("", "All Eras"),
    option(ERA_CLASSIC, "Classic"),
    option(ERA_RENAISSANCE, "Renaissance"),
    option(ERA_MODERN, "Modern"),
];

/// Canonical title fragments per era, checked in this order.
const ERA_FILMS: &[(&str, &[&str])] = &[
    (
        ERA_CLASSIC,
        &["Snow White", "Cinderella", "Sleeping Beauty", "Peter Pan"],
    ),
    (
        ERA_RENAISSANCE,
        &[
            "The Little Mermaid",
            "Beauty and the Beast",
            "Aladdin",
            "The Lion King",
            "Hercules",
            "Mulan",
        ],
    ),
    (
        ERA_MODERN,
        &["Frozen", "Toy Story", "Moana", "Tangled", "Princess and the Frog"],
    ),
];

/// Whether `title` belongs to `era` according to the era film table.
///
/// Unknown eras contain no titles.
pub fn title_in_era(title: &str, era: &str) -> bool {
    let title = title.to_lowercase();
    ERA_FILMS
        .iter()
        .filter(|(key, _)| *key == era)
        .flat_map(|(_, films)| films.iter())
        .any(|film| title.contains(&film.to_lowercase()))
}

/// Derive the era of a character from its first-listed film.
///
/// Returns `None` for characters without films or whose first film is not
/// in any era.
pub fn derive_era(character: &Character) -> Option<&'static str> {
    let first = character.films.first()?;
    ERA_FILMS
        .iter()
        .map(|(key, _)| *key)
        .find(|era| title_in_era(first, era))
}
