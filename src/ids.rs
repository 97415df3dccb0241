//! Identifier allocation.
//!
//! User ids are random UUIDs assigned once at registration. Albums, songs and
//! playlists get integer ids one past the largest id currently stored, which
//! stays unique after gaps and is computed while the owning collection is
//! locked.

use std::fmt::Display;

use uuid::Uuid;

use crate::{
    error::{CatalogError, Result},
    store::Collection,
    types::{Album, Playlist, Song, User, UserId},
};

/// A record stored in one of the four collections.
pub trait Entity {
    type Id: Clone + PartialEq + Display;

    const COLLECTION: Collection;

    fn id(&self) -> &Self::Id;
}

impl Entity for User {
    type Id = UserId;
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for Album {
    type Id = u32;
    const COLLECTION: Collection = Collection::Albums;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for Song {
    type Id = u32;
    const COLLECTION: Collection = Collection::Songs;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for Playlist {
    type Id = u32;
    const COLLECTION: Collection = Collection::Playlists;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub fn new_user_id() -> UserId {
    Uuid::new_v4().to_string()
}

/// Next free integer id for `items`: one past the maximum, or 1 when empty.
pub fn next_id<T: Entity<Id = u32>>(items: &[T]) -> Result<u32> {
    match items.iter().map(|item| *item.id()).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            CatalogError::validation(format!("{} id space exhausted", T::COLLECTION))
        }),
    }
}

pub fn position_of<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u32) -> Song {
        Song {
            id,
            name: format!("song {}", id),
            duration: "3:00".to_string(),
            link: String::new(),
            played: 0,
            liked: 0,
        }
    }

    #[test]
    fn empty_collection_starts_at_one() {
        let songs: Vec<Song> = Vec::new();
        assert_eq!(next_id(&songs).unwrap(), 1);
    }

    #[test]
    fn next_id_skips_past_gaps() {
        // length + 1 would hand out 3 again here
        let songs = vec![song(1), song(3)];
        assert_eq!(next_id(&songs).unwrap(), 4);
    }

    #[test]
    fn next_id_reports_exhaustion() {
        let songs = vec![song(u32::MAX)];
        assert!(matches!(
            next_id(&songs),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn user_ids_are_unique() {
        let a = new_user_id();
        let b = new_user_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
