//! Rankings and totals computed from the current collection contents.
//!
//! Nothing here is cached: every call loads the collections it joins.

use std::collections::HashSet;

use crate::{
    error::Result,
    types::{Album, LikeTarget, RankEntry, Song, SongId, User},
    utils::rank_descending,
};

use super::Catalog;

pub const DEFAULT_TOP_SONGS: usize = 10;
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// Global top-N rankings for the statistics view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboards {
    pub musicians: Vec<RankEntry>,
    pub albums: Vec<RankEntry>,
    pub songs: Vec<RankEntry>,
}

/// Songs on albums whose artist is `owner_id`, in song collection order.
/// A song on several of the artist's albums appears once; tracklist ids that
/// no longer resolve are skipped.
pub fn songs_by_artist(owner_id: &str, albums: &[Album], songs: &[Song]) -> Vec<Song> {
    let owned: HashSet<SongId> = albums
        .iter()
        .filter(|a| a.artist == owner_id)
        .flat_map(|a| a.tracklist.iter().copied())
        .collect();
    songs
        .iter()
        .filter(|s| owned.contains(&s.id))
        .cloned()
        .collect()
}

/// Sum of plays over the album's tracklist.
pub fn album_streams(album: &Album, songs: &[Song]) -> u64 {
    album
        .tracklist
        .iter()
        .filter_map(|id| songs.iter().find(|s| s.id == *id))
        .map(|s| s.played)
        .sum()
}

fn count_likes(target: &LikeTarget, users: &[User]) -> usize {
    users
        .iter()
        .filter(|u| match target {
            LikeTarget::Album(id) => u.liked_albums.contains(id),
            LikeTarget::Song(id) => u.liked_songs.contains(id),
            LikeTarget::Artist(id) => u.liked_artists.contains(id),
        })
        .count()
}

pub fn leaderboards_from(
    users: &[User],
    albums: &[Album],
    songs: &[Song],
    n: usize,
) -> Leaderboards {
    let musicians = users
        .iter()
        .filter(|u| u.is_musician())
        .map(|u| RankEntry {
            name: u.name.clone(),
            metric: songs_by_artist(&u.id, albums, songs)
                .iter()
                .map(|s| s.played)
                .sum(),
        })
        .collect();

    let album_entries = albums
        .iter()
        .map(|a| RankEntry {
            name: a.name.clone(),
            metric: album_streams(a, songs),
        })
        .collect();

    let song_entries = songs
        .iter()
        .map(|s| RankEntry {
            name: s.name.clone(),
            metric: s.played,
        })
        .collect();

    Leaderboards {
        musicians: rank_descending(musicians, n, |e| e.metric),
        albums: rank_descending(album_entries, n, |e| e.metric),
        songs: rank_descending(song_entries, n, |e| e.metric),
    }
}

impl Catalog {
    /// Every song on an album whose artist is `owner`. Listeners own no
    /// songs, so the result is empty for them.
    ///
    /// # Errors
    ///
    /// Returns an IO failure if the albums or songs cannot be loaded.
    pub async fn songs_of(&self, owner: &User) -> Result<Vec<Song>> {
        let albums: Vec<Album> = self.read().await?;
        let songs: Vec<Song> = self.read().await?;
        Ok(songs_by_artist(&owner.id, &albums, &songs))
    }

    /// Sum of `played` over [`Catalog::songs_of`].
    pub async fn total_played(&self, owner: &User) -> Result<u64> {
        Ok(self.songs_of(owner).await?.iter().map(|s| s.played).sum())
    }

    /// The owner's songs by play count, highest first; equal counts keep
    /// catalog order.
    pub async fn top_songs(&self, owner: &User, n: usize) -> Result<Vec<Song>> {
        let songs = self.songs_of(owner).await?;
        Ok(rank_descending(songs, n, |s| s.played))
    }

    /// Sum of `played` over the songs in `album`'s tracklist.
    pub async fn total_streams(&self, album: &Album) -> Result<u64> {
        let songs: Vec<Song> = self.read().await?;
        Ok(album_streams(album, &songs))
    }

    /// Number of users whose liked set contains `target`.
    pub async fn like_count(&self, target: &LikeTarget) -> Result<usize> {
        let users: Vec<User> = self.read().await?;
        Ok(count_likes(target, &users))
    }

    /// Global rankings: musicians by total plays, albums by streams and songs
    /// by plays, each truncated to `n` entries. Ties keep catalog order.
    ///
    /// # Example
    ///
    /// ```
    /// let boards = catalog.leaderboards(DEFAULT_LEADERBOARD_SIZE).await?;
    /// println!("{}", Table::new(&boards.songs));
    /// ```
    pub async fn leaderboards(&self, n: usize) -> Result<Leaderboards> {
        let users: Vec<User> = self.read().await?;
        let albums: Vec<Album> = self.read().await?;
        let songs: Vec<Song> = self.read().await?;
        Ok(leaderboards_from(&users, &albums, &songs, n))
    }
}
