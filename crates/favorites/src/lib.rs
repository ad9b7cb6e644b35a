//! Favorites store.
//!
//! A keyed set of character snapshots the user bookmarked, with its own
//! lifecycle: it never takes part in filtering. Every actual mutation is
//! persisted as a flat JSON array and broadcast as
//! [`Signal::FavoritesChanged`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use marquee_core::{Character, CharacterId};
use marquee_events::{EventBus, Signal};

/// Errors writing the favorites file.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Failed to write favorites file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

type Entries = IndexMap<CharacterId, Character>;

/// Bookmarked characters, keyed by id in insertion order.
pub struct FavoritesStore {
    entries: RwLock<Entries>,
    path: Option<PathBuf>,
    bus: Arc<EventBus>,
}

impl FavoritesStore {
    /// A store that is never written to disk.
    pub fn in_memory(bus: Arc<EventBus>) -> Self {
        Self {
            entries: RwLock::new(Entries::new()),
            path: None,
            bus,
        }
    }

    /// Load the store backed by `path`.
    ///
    /// A missing or malformed file yields an empty store; malformed content
    /// is logged and otherwise ignored.
    pub fn load(path: impl Into<PathBuf>, bus: Arc<EventBus>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        tracing::info!(path = %path.display(), count = entries.len(), "Favorites loaded");
        Self {
            entries: RwLock::new(entries),
            path: Some(path),
            bus,
        }
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.read().contains_key(&id)
    }

    pub fn get(&self, id: CharacterId) -> Option<Character> {
        self.read().get(&id).cloned()
    }

    /// Snapshot of every favorite in the order they were added.
    pub fn list(&self) -> Vec<Character> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Add a snapshot. Returns `false` (and changes nothing) when the id is
    /// already a favorite.
    pub fn add(&self, character: Character) -> bool {
        let mut entries = self.write();
        if entries.contains_key(&character.id) {
            return false;
        }
        tracing::debug!(id = character.id, name = %character.name, "Favorite added");
        entries.insert(character.id, character);
        self.commit(entries);
        true
    }

    /// Remove by id. Returns `false` when the id was not a favorite.
    pub fn remove(&self, id: CharacterId) -> bool {
        let mut entries = self.write();
        if entries.shift_remove(&id).is_none() {
            return false;
        }
        tracing::debug!(id, "Favorite removed");
        self.commit(entries);
        true
    }

    /// Add when absent, remove when present. Returns the new favorite flag.
    pub fn toggle(&self, character: Character) -> bool {
        if self.remove(character.id) {
            false
        } else {
            self.add(character)
        }
    }

    // ---- private helpers ----

    /// Persist the mutated entries, release the lock, then broadcast.
    fn commit(&self, entries: RwLockWriteGuard<'_, Entries>) {
        if let Some(path) = &self.path {
            if let Err(e) = write_entries(path, &entries) {
                tracing::error!(path = %path.display(), error = %e, "Failed to save favorites");
            }
        }
        drop(entries);
        self.bus.publish(Signal::FavoritesChanged);
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_entries(path: &Path) -> Entries {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Entries::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read favorites, starting empty");
            return Entries::new();
        }
    };

    match serde_json::from_slice::<Vec<Character>>(&raw) {
        Ok(list) => list.into_iter().map(|c| (c.id, c)).collect(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed favorites file, starting empty");
            Entries::new()
        }
    }
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), FavoritesError> {
    let list: Vec<&Character> = entries.values().collect();
    let json = serde_json::to_vec_pretty(&list)?;
    std::fs::write(path, json)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
