//! Role derivation.
//!
//! A role is never stored on a record. [`derive_role`] is the single place
//! that decides it, from ally, enemy and park-attraction relations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::{option, FilterOption};
use crate::types::Character;

pub const ROLE_OPTIONS: &[FilterOption] = &[
    option("", "All Roles"),
    option("hero", "Hero"),
    option("villain", "Villain"),
    option("sidekick", "Sidekick"),
];

/// Derived role of a catalog character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Sidekick,
    Villain,
    Hero,
    #[serde(rename = "Featured Character")]
    FeaturedCharacter,
    Character,
}

impl Role {
    /// Display label, also the value role filters compare against.
    pub fn label(self) -> &'static str {
        match self {
            Role::Sidekick => "Sidekick",
            Role::Villain => "Villain",
            Role::Hero => "Hero",
            Role::FeaturedCharacter => "Featured Character",
            Role::Character => "Character",
        }
    }

    /// Whether a requested role filter value selects this role.
    pub fn matches(self, requested: &str) -> bool {
        self.label().eq_ignore_ascii_case(requested)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive a character's role. First matching rule wins:
///
/// 1. allies and no enemies: [`Role::Sidekick`]
/// 2. enemies and no allies: [`Role::Villain`]
/// 3. both allies and enemies: [`Role::Hero`]
/// 4. any park attraction: [`Role::FeaturedCharacter`]
/// 5. otherwise [`Role::Character`]
pub fn derive_role(character: &Character) -> Role {
    let has_allies = !character.allies.is_empty();
    let has_enemies = !character.enemies.is_empty();

    match (has_allies, has_enemies) {
        (true, false) => Role::Sidekick,
        (false, true) => Role::Villain,
        (true, true) => Role::Hero,
        (false, false) if !character.park_attractions.is_empty() => Role::FeaturedCharacter,
        (false, false) => Role::Character,
    }
}
