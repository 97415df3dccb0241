use chrono::Utc;
use tabled::Table;

use crate::{
    error, info,
    management::Catalog,
    success,
    types::{AlbumId, LikeTarget, NewAlbum, NewSong, PlaylistId, SongId},
    utils, warning,
};

pub struct AlbumDraft {
    pub artist: String,
    pub name: String,
    pub description: String,
    pub cover: String,
    pub published: Option<String>,
    pub genre: String,
    pub tracks: Vec<NewSong>,
}

/// Creates an album for the musician named in `draft.artist`.
pub async fn create_album(catalog: &Catalog, draft: AlbumDraft) {
    let artist = match catalog.find_by_username(&draft.artist).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load artist {}. Err: {}", draft.artist, e),
    };

    // published defaults to today, same format as the seed data
    let published = draft
        .published
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

    let album = NewAlbum {
        name: draft.name,
        description: draft.description,
        cover: draft.cover,
        published,
        genre: draft.genre,
        tracks: draft.tracks,
    };

    match catalog.create_album(&artist.id, &album).await {
        Ok(album) => success!(
            "Created album {} ({}) with {} songs",
            album.name,
            album.id,
            album.tracklist.len()
        ),
        Err(e) => error!("Cannot create album. Err: {}", e),
    }
}

/// Prints an album with its artist, likes, streams and songs.
pub async fn show_album(catalog: &Catalog, id: AlbumId) {
    let album = match catalog.find_album(id).await {
        Ok(album) => album,
        Err(e) => error!("Cannot load album. Err: {}", e),
    };

    info!("Album: {}", album);
    if !album.description.is_empty() {
        info!("{}", album.description);
    }
    match catalog.album_artist(&album).await {
        Ok(artist) => info!("Artist: {}", artist.name),
        Err(e) if e.is_not_found() => warning!("Artist {} no longer exists.", album.artist),
        Err(e) => error!("Cannot load artist. Err: {}", e),
    }
    match catalog.like_count(&LikeTarget::Album(album.id)).await {
        Ok(likes) => info!("Liked by {} users", likes),
        Err(e) => error!("Cannot count likes. Err: {}", e),
    }
    match catalog.total_streams(&album).await {
        Ok(streams) => info!("Streams: {}", streams),
        Err(e) => error!("Cannot compute streams. Err: {}", e),
    }

    match catalog.album_songs(&album).await {
        Ok(songs) => println!("{}", Table::new(utils::song_rows(&songs))),
        Err(e) => error!("Cannot load songs. Err: {}", e),
    }
}

pub async fn search_albums(catalog: &Catalog, query: &str) {
    match catalog.search_albums(query).await {
        Ok(albums) if albums.is_empty() => warning!("No albums match '{}'.", query),
        Ok(albums) => println!("{}", Table::new(utils::album_rows(&albums))),
        Err(e) => error!("Cannot search albums. Err: {}", e),
    }
}

/// Counts a play and optionally opens the song link in the browser.
pub async fn play_song(catalog: &Catalog, id: SongId, open: bool) {
    let song = match catalog.play_song(id).await {
        Ok(song) => song,
        Err(e) => error!("Cannot play song. Err: {}", e),
    };

    success!("Playing {} ({} plays)", song, song.played);
    if open {
        if let Err(e) = webbrowser::open(&song.link) {
            warning!("Cannot open {}. Err: {}", song.link, e);
        }
    }
}

pub async fn show_song(catalog: &Catalog, id: SongId) {
    match catalog.find_song(id).await {
        Ok(song) => {
            info!("Song: {}", song);
            info!("Link: {}", song.link);
            info!("Played {} times, liked {} times", song.played, song.liked);
        }
        Err(e) => error!("Cannot load song. Err: {}", e),
    }
}

pub async fn search_songs(catalog: &Catalog, query: &str) {
    match catalog.search_songs(query).await {
        Ok(songs) if songs.is_empty() => warning!("No songs match '{}'.", query),
        Ok(songs) => println!("{}", Table::new(utils::song_rows(&songs))),
        Err(e) => error!("Cannot search songs. Err: {}", e),
    }
}

/// Creates a playlist for the user named `creator`.
pub async fn create_playlist(
    catalog: &Catalog,
    creator: &str,
    name: &str,
    description: &str,
    tracks: &[SongId],
) {
    let user = match catalog.find_by_username(creator).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user {}. Err: {}", creator, e),
    };

    match catalog
        .create_playlist(&user.id, name, description, tracks)
        .await
    {
        Ok(playlist) => success!(
            "Created playlist {} ({}) with {} tracks",
            playlist.name,
            playlist.id,
            playlist.tracks.len()
        ),
        Err(e) => error!("Cannot create playlist. Err: {}", e),
    }
}

/// Prints a playlist with its creator and tracks.
pub async fn show_playlist(catalog: &Catalog, id: PlaylistId) {
    let playlist = match catalog.find_playlist(id).await {
        Ok(playlist) => playlist,
        Err(e) => error!("Cannot load playlist. Err: {}", e),
    };

    info!("Playlist: {}", playlist);
    match catalog.find_user(&playlist.creator).await {
        Ok(creator) => info!("Created by {}", creator.username),
        Err(e) if e.is_not_found() => {
            warning!("Creator {} no longer exists.", playlist.creator)
        }
        Err(e) => error!("Cannot load creator. Err: {}", e),
    }

    match catalog.playlist_tracks(&playlist).await {
        Ok(songs) => println!("{}", Table::new(utils::song_rows(&songs))),
        Err(e) => error!("Cannot load tracks. Err: {}", e),
    }
}

pub async fn search_playlists(catalog: &Catalog, query: &str) {
    match catalog.search_playlists(query).await {
        Ok(playlists) if playlists.is_empty() => warning!("No playlists match '{}'.", query),
        Ok(playlists) => println!("{}", Table::new(utils::playlist_rows(&playlists))),
        Err(e) => error!("Cannot search playlists. Err: {}", e),
    }
}
