//! Display helpers for character cards.

use serde::Serialize;

use crate::role::{derive_role, Role};
use crate::types::Character;

pub const NO_MEDIA_APPEARANCES: &str = "No media appearances";

/// One-line summary of where a character appears: the first film, else the
/// first TV show, short film or game.
pub fn media_appearance(character: &Character) -> String {
    let sources = [
        ("Film", &character.films),
        ("TV", &character.tv_shows),
        ("Short Film", &character.short_films),
        ("Game", &character.video_games),
    ];

    sources
        .iter()
        .find_map(|(kind, titles)| titles.first().map(|t| format!("{kind}: {t}")))
        .unwrap_or_else(|| NO_MEDIA_APPEARANCES.to_string())
}

/// A run of text, flagged when it matched the highlighted term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Split `text` into segments, flagging case-insensitive occurrences of the
/// trimmed `term`. A blank term yields the whole text as one plain segment.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    let term = term.trim();
    if term.is_empty() || text.is_empty() {
        return vec![Segment {
            text: text.to_string(),
            highlighted: false,
        }];
    }

    // Char-level folding keeps byte offsets of `text` usable for slicing.
    let folded: Vec<(usize, char)> = text
        .char_indices()
        .map(|(i, c)| (i, fold(c)))
        .collect();
    let needle: Vec<char> = term.chars().map(fold).collect();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let window = folded[i..i + needle.len()].iter().map(|(_, c)| *c);
        if window.eq(needle.iter().copied()) {
            let start = folded[i].0;
            let end = folded
                .get(i + needle.len())
                .map_or(text.len(), |(offset, _)| *offset);
            push(&mut segments, &text[plain_start..start], false);
            push(&mut segments, &text[start..end], true);
            plain_start = end;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    push(&mut segments, &text[plain_start..], false);
    segments
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn push(segments: &mut Vec<Segment>, text: &str, highlighted: bool) {
    if !text.is_empty() {
        segments.push(Segment {
            text: text.to_string(),
            highlighted,
        });
    }
}

/// Everything a results card shows for one character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterCard {
    pub character: Character,
    pub role: Role,
    pub media: String,
    pub is_favorite: bool,
    pub name_segments: Vec<Segment>,
}

impl CharacterCard {
    pub fn new(character: Character, search: &str, is_favorite: bool) -> Self {
        Self {
            role: derive_role(&character),
            media: media_appearance(&character),
            name_segments: highlight(&character.name, search),
            is_favorite,
            character,
        }
    }
}
