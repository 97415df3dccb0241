use std::collections::HashSet;

use tabled::Tabled;

use crate::{
    error::Result,
    types::{Album, Playlist, Song, User},
};

use super::Catalog;

/// A stored reference whose target no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct DanglingReference {
    pub record: String,
    pub field: &'static str,
    pub missing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

pub fn check_integrity(
    users: &[User],
    albums: &[Album],
    songs: &[Song],
    playlists: &[Playlist],
) -> IntegrityReport {
    let user_ids: HashSet<&str> = users.iter().map(|u| u.id.as_str()).collect();
    let album_ids: HashSet<u32> = albums.iter().map(|a| a.id).collect();
    let song_ids: HashSet<u32> = songs.iter().map(|s| s.id).collect();
    let mut dangling = Vec::new();

    let mut push = |record: String, field: &'static str, missing: String| {
        dangling.push(DanglingReference {
            record,
            field,
            missing,
        })
    };

    for album in albums {
        let record = format!("album {}", album.id);
        if !user_ids.contains(album.artist.as_str()) {
            push(record.clone(), "artist", album.artist.clone());
        }
        for id in album.tracklist.iter().filter(|id| !song_ids.contains(*id)) {
            push(record.clone(), "tracklist", id.to_string());
        }
    }

    for playlist in playlists {
        let record = format!("playlist {}", playlist.id);
        if !user_ids.contains(playlist.creator.as_str()) {
            push(record.clone(), "creator", playlist.creator.clone());
        }
        for id in playlist.tracks.iter().filter(|id| !song_ids.contains(*id)) {
            push(record.clone(), "tracks", id.to_string());
        }
    }

    for user in users {
        let record = format!("user {}", user.username);
        for id in user.liked_albums.iter().filter(|id| !album_ids.contains(*id)) {
            push(record.clone(), "liked_albums", id.to_string());
        }
        for id in user.liked_songs.iter().filter(|id| !song_ids.contains(*id)) {
            push(record.clone(), "liked_songs", id.to_string());
        }
        for id in user
            .liked_artists
            .iter()
            .filter(|id| !user_ids.contains(id.as_str()))
        {
            push(record.clone(), "liked_artists", id.clone());
        }
    }

    IntegrityReport { dangling }
}

impl Catalog {
    /// Lists every reference across the collections that does not resolve.
    pub async fn audit(&self) -> Result<IntegrityReport> {
        let users: Vec<User> = self.read().await?;
        let albums: Vec<Album> = self.read().await?;
        let songs: Vec<Song> = self.read().await?;
        let playlists: Vec<Playlist> = self.read().await?;
        Ok(check_integrity(&users, &albums, &songs, &playlists))
    }
}
