//! Catalog entity types.

use serde::{Deserialize, Serialize};

/// Catalog identifiers are the upstream numeric `_id`.
pub type CharacterId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// One catalog character record, as returned by the upstream catalog.
///
/// Records are immutable once fetched. Every list field defaults to empty
/// when the upstream payload omits it, so a sparse record still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(rename = "_id")]
    pub id: CharacterId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub short_films: Vec<String>,
    #[serde(default)]
    pub tv_shows: Vec<String>,
    #[serde(default)]
    pub video_games: Vec<String>,
    #[serde(default)]
    pub allies: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<String>,
    #[serde(default)]
    pub park_attractions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Character {
    /// Create a record with only an id and a name; every list starts empty.
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            films: Vec::new(),
            short_films: Vec::new(),
            tv_shows: Vec::new(),
            video_games: Vec::new(),
            allies: Vec::new(),
            enemies: Vec::new(),
            park_attractions: Vec::new(),
            source_url: None,
            image_url: None,
        }
    }

    /// Every media title in catalog order: films, short films, TV shows,
    /// then video games.
    pub fn media_titles(&self) -> impl Iterator<Item = &str> {
        self.films
            .iter()
            .chain(&self.short_films)
            .chain(&self.tv_shows)
            .chain(&self.video_games)
            .map(String::as_str)
    }

    pub fn with_films<I, S>(mut self, films: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.films = films.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tv_shows<I, S>(mut self, shows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tv_shows = shows.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allies<I, S>(mut self, allies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allies = allies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enemies<I, S>(mut self, enemies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enemies = enemies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_park_attractions<I, S>(mut self, attractions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.park_attractions = attractions.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_upstream_record() {
        let json = serde_json::json!({
            "_id": 308,
            "name": "Ariel",
            "films": ["The Little Mermaid"],
            "imageUrl": "https://example.test/ariel.png"
        });

        let character: Character = serde_json::from_value(json).unwrap();
        assert_eq!(character.id, 308);
        assert_eq!(character.films, vec!["The Little Mermaid"]);
        assert!(character.allies.is_empty());
        assert_eq!(
            character.image_url.as_deref(),
            Some("https://example.test/ariel.png")
        );
        assert!(character.source_url.is_none());
    }

    #[test]
    fn media_titles_follow_catalog_order() {
        let mut character = Character::new(1, "Stitch").with_tv_shows(["Lilo & Stitch: The Series"]);
        character.video_games = vec!["Stitch: Experiment 626".into()];
        character.short_films = vec!["Stitch's Great Escape".into()];

        let titles: Vec<&str> = character.media_titles().collect();
        assert_eq!(
            titles,
            vec![
                "Stitch's Great Escape",
                "Lilo & Stitch: The Series",
                "Stitch: Experiment 626"
            ]
        );
    }
}
