//! Seed data download.
//!
//! The seed repository publishes `users.json`, `albums.json` (with full track
//! objects nested in each tracklist) and `playlists.json`. Remote ids may be
//! strings or numbers; albums, songs and playlists are renumbered from 1 in
//! document order and every reference is rewritten to the new ids.

use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::Result,
    types::{Album, Playlist, Seed, Song, SongId, User, UserType},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Text(String),
    Number(u64),
}

impl RemoteId {
    fn key(&self) -> String {
        match self {
            RemoteId::Text(s) => s.clone(),
            RemoteId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: RemoteId,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: UserType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTrack {
    pub id: RemoteId,
    pub name: String,
    pub duration: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAlbum {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub genre: String,
    pub artist: RemoteId,
    #[serde(default)]
    pub tracklist: Vec<RemoteTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePlaylist {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub creator: RemoteId,
    #[serde(default)]
    pub tracks: Vec<RemoteId>,
}

/// Converts the three remote documents into replacement collections.
///
/// Songs start with zero plays and likes, users with empty liked sets.
/// Playlist tracks that match no album track are dropped.
pub fn build_seed(
    users: Vec<RemoteUser>,
    albums: Vec<RemoteAlbum>,
    playlists: Vec<RemotePlaylist>,
) -> Seed {
    let mut seed = Seed {
        users: users
            .into_iter()
            .map(|u| User::new(u.id.key(), u.name, u.email, u.username, u.kind))
            .collect(),
        ..Seed::default()
    };

    let mut song_ids: HashMap<String, SongId> = HashMap::new();

    for (index, album) in albums.into_iter().enumerate() {
        let mut tracklist = Vec::with_capacity(album.tracklist.len());
        for track in album.tracklist {
            let key = track.id.key();
            let id = match song_ids.get(&key) {
                Some(id) => *id,
                None => {
                    let id = seed.songs.len() as SongId + 1;
                    song_ids.insert(key, id);
                    seed.songs.push(Song {
                        id,
                        name: track.name,
                        duration: track.duration,
                        link: track.link,
                        played: 0,
                        liked: 0,
                    });
                    id
                }
            };
            tracklist.push(id);
        }

        seed.albums.push(Album {
            id: index as u32 + 1,
            name: album.name,
            description: utils::single_line(&album.description),
            cover: album.cover,
            published: album.published,
            genre: album.genre,
            artist: album.artist.key(),
            tracklist,
        });
    }

    seed.playlists = playlists
        .into_iter()
        .enumerate()
        .map(|(index, playlist)| Playlist {
            id: index as u32 + 1,
            name: playlist.name,
            description: utils::single_line(&playlist.description),
            creator: playlist.creator.key(),
            tracks: playlist
                .tracks
                .iter()
                .filter_map(|id| song_ids.get(&id.key()).copied())
                .collect(),
        })
        .collect();

    for playlist in &seed.playlists {
        if let Some(creator) = seed.users.iter_mut().find(|u| u.id == playlist.creator) {
            creator.playlists.push(playlist.id);
        }
    }

    seed
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}

/// Downloads the seed documents from `base_url` and builds the collections.
pub async fn fetch_seed(base_url: &str) -> Result<Seed> {
    let base = base_url.trim_end_matches('/');
    let client = Client::new();

    let users: Vec<RemoteUser> = get_json(&client, &format!("{}/users.json", base)).await?;
    let albums: Vec<RemoteAlbum> = get_json(&client, &format!("{}/albums.json", base)).await?;
    let playlists: Vec<RemotePlaylist> =
        get_json(&client, &format!("{}/playlists.json", base)).await?;

    Ok(build_seed(users, albums, playlists))
}
