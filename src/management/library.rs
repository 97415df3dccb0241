use std::collections::HashMap;

use crate::{
    error::{CatalogError, Result},
    ids,
    types::{Album, AlbumId, NewAlbum, NewSong, Playlist, PlaylistId, Song, SongId, User},
};

use super::{
    Catalog,
    users::{find_user_mut, required},
};

fn new_song(id: SongId, song: &NewSong) -> Result<Song> {
    Ok(Song {
        id,
        name: required("song name", &song.name)?,
        duration: required("song duration", &song.duration)?,
        link: required("song link", &song.link)?,
        played: 0,
        liked: 0,
    })
}

/// Resolves `ids` against `songs`, keeping the order of `ids` and skipping
/// ids that no longer resolve.
pub(crate) fn resolve_songs(ids: &[SongId], songs: &[Song]) -> Vec<Song> {
    let index: HashMap<SongId, &Song> = songs.iter().map(|s| (s.id, s)).collect();
    ids.iter()
        .filter_map(|id| index.get(id).map(|s| (*s).clone()))
        .collect()
}

fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

impl Catalog {
    /// Adds a standalone song with zero plays and likes.
    pub async fn create_song(&self, song: &NewSong) -> Result<Song> {
        self.update::<Song, _, _>(|songs| {
            let song = new_song(ids::next_id(songs)?, song)?;
            songs.push(song.clone());
            Ok(song)
        })
        .await
    }

    /// Creates an album and its songs together.
    ///
    /// The artist is checked under the users lock, which stays held until the
    /// album is saved. A concurrent `delete_user` therefore either runs first
    /// and the album is rejected, or runs after and reports it as orphaned.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `artist_id` is not a registered user
    /// - `Validation` if the user is a listener or a required field is empty
    /// - an IO failure if either collection cannot be read or written
    pub async fn create_album(&self, artist_id: &str, album: &NewAlbum) -> Result<Album> {
        let name = required("album name", &album.name)?;

        self.update_pair_checked::<User, Album, Song, _, _>(|users, albums, songs| {
            let artist = users
                .iter()
                .find(|u| u.id == artist_id)
                .ok_or_else(|| CatalogError::not_found("user", artist_id))?;
            if !artist.is_musician() {
                return Err(CatalogError::validation(format!(
                    "{} is not a musician",
                    artist.username
                )));
            }

            let mut tracklist = Vec::with_capacity(album.tracks.len());
            for track in &album.tracks {
                let song = new_song(ids::next_id(songs)?, track)?;
                tracklist.push(song.id);
                songs.push(song);
            }

            let created = Album {
                id: ids::next_id(albums)?,
                name,
                description: album.description.trim().to_string(),
                cover: album.cover.trim().to_string(),
                published: album.published.trim().to_string(),
                genre: album.genre.trim().to_string(),
                artist: artist.id.clone(),
                tracklist,
            };
            albums.push(created.clone());
            Ok(created)
        })
        .await
    }

    /// Creates a playlist and records it in the creator's `playlists` list.
    /// Every track must reference an existing song.
    pub async fn create_playlist(
        &self,
        creator_id: &str,
        name: &str,
        description: &str,
        tracks: &[SongId],
    ) -> Result<Playlist> {
        let name = required("playlist name", name)?;

        let songs: Vec<Song> = self.read().await?;
        if let Some(missing) = tracks.iter().find(|id| !songs.iter().any(|s| s.id == **id)) {
            return Err(CatalogError::not_found("song", missing));
        }

        self.update_pair::<User, Playlist, _, _>(|users, playlists| {
            let creator = find_user_mut(users, creator_id)?;

            let playlist = Playlist {
                id: ids::next_id(playlists)?,
                name,
                description: description.trim().to_string(),
                creator: creator.id.clone(),
                tracks: tracks.to_vec(),
            };
            creator.playlists.push(playlist.id);
            playlists.push(playlist.clone());
            Ok(playlist)
        })
        .await
    }

    /// Counts one play of a song.
    pub async fn play_song(&self, song_id: SongId) -> Result<Song> {
        self.update::<Song, _, _>(|songs| {
            let song = songs
                .iter_mut()
                .find(|s| s.id == song_id)
                .ok_or_else(|| CatalogError::not_found("song", song_id))?;
            song.played += 1;
            Ok(song.clone())
        })
        .await
    }

    /// Looks up an album by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no album has `id`.
    pub async fn find_album(&self, id: AlbumId) -> Result<Album> {
        let albums: Vec<Album> = self.read().await?;
        albums
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::not_found("album", id))
    }

    /// Looks up a song by id.
    pub async fn find_song(&self, id: SongId) -> Result<Song> {
        let songs: Vec<Song> = self.read().await?;
        songs
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::not_found("song", id))
    }

    /// Looks up a playlist by id.
    pub async fn find_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        let playlists: Vec<Playlist> = self.read().await?;
        playlists
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("playlist", id))
    }

    /// The album's artist. Fails with `NotFound` once the artist was deleted.
    pub async fn album_artist(&self, album: &Album) -> Result<User> {
        self.find_user(&album.artist).await
    }

    /// Songs of an album in tracklist order.
    pub async fn album_songs(&self, album: &Album) -> Result<Vec<Song>> {
        let songs: Vec<Song> = self.read().await?;
        Ok(resolve_songs(&album.tracklist, &songs))
    }

    /// Tracks of a playlist in stored order. Ids that no longer resolve are
    /// skipped.
    pub async fn playlist_tracks(&self, playlist: &Playlist) -> Result<Vec<Song>> {
        let songs: Vec<Song> = self.read().await?;
        Ok(resolve_songs(&playlist.tracks, &songs))
    }

    /// Albums whose artist is `user_id`, in catalog order.
    pub async fn albums_of(&self, user_id: &str) -> Result<Vec<Album>> {
        let albums: Vec<Album> = self.read().await?;
        Ok(albums.into_iter().filter(|a| a.artist == user_id).collect())
    }

    /// Playlists created by the user, derived from `Playlist::creator`.
    pub async fn playlists_of(&self, user_id: &str) -> Result<Vec<Playlist>> {
        let playlists: Vec<Playlist> = self.read().await?;
        Ok(playlists
            .into_iter()
            .filter(|p| p.creator == user_id)
            .collect())
    }

    /// Songs whose name contains `query`, ignoring case.
    pub async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        let songs: Vec<Song> = self.read().await?;
        Ok(songs
            .into_iter()
            .filter(|s| name_matches(&s.name, query))
            .collect())
    }

    /// Albums whose name contains `query`, ignoring case.
    pub async fn search_albums(&self, query: &str) -> Result<Vec<Album>> {
        let albums: Vec<Album> = self.read().await?;
        Ok(albums
            .into_iter()
            .filter(|a| name_matches(&a.name, query))
            .collect())
    }

    /// Musicians whose name contains `query`, ignoring case. Listeners are
    /// never returned.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<User>> {
        let users: Vec<User> = self.read().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.is_musician() && name_matches(&u.name, query))
            .collect())
    }

    /// Playlists whose name contains `query`, ignoring case.
    pub async fn search_playlists(&self, query: &str) -> Result<Vec<Playlist>> {
        let playlists: Vec<Playlist> = self.read().await?;
        Ok(playlists
            .into_iter()
            .filter(|p| name_matches(&p.name, query))
            .collect())
    }
}
