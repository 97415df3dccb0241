use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub type UserId = String;
pub type AlbumId = u32;
pub type SongId = u32;
pub type PlaylistId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Listener,
    Musician,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Listener => write!(f, "listener"),
            UserType::Musician => write!(f, "musician"),
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listener" => Ok(UserType::Listener),
            "musician" => Ok(UserType::Musician),
            other => Err(format!(
                "Invalid user type: '{}'. Valid types are: listener, musician",
                other
            )),
        }
    }
}

/// A registered account. The liked sets hold ids of entities in other
/// collections and are resolved through the catalog at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: UserType,
    #[serde(default)]
    pub liked_albums: BTreeSet<AlbumId>,
    #[serde(default, alias = "songs_liked")]
    pub liked_songs: BTreeSet<SongId>,
    #[serde(default, alias = "artists_liked")]
    pub liked_artists: BTreeSet<UserId>,
    /// Mirror of the playlists this user created. `Playlist::creator` is the
    /// source of truth.
    #[serde(default)]
    pub playlists: Vec<PlaylistId>,
}

impl User {
    pub fn new(id: UserId, name: String, email: String, username: String, kind: UserType) -> Self {
        Self {
            id,
            name,
            email,
            username,
            kind,
            liked_albums: BTreeSet::new(),
            liked_songs: BTreeSet::new(),
            liked_artists: BTreeSet::new(),
            playlists: Vec::new(),
        }
    }

    pub fn is_musician(&self) -> bool {
        self.kind == UserType::Musician
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} is a {}", self.name, self.username, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub description: String,
    pub cover: String,
    pub published: String,
    pub genre: String,
    pub artist: UserId,
    #[serde(default)]
    pub tracklist: Vec<SongId>,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.published)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub duration: String,
    pub link: String,
    #[serde(default)]
    pub played: u64,
    #[serde(default)]
    pub liked: i64,
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.duration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub creator: UserId,
    #[serde(default)]
    pub tracks: Vec<SongId>,
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// Input for a song that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub name: String,
    pub duration: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub name: String,
    pub description: String,
    pub cover: String,
    pub published: String,
    pub genre: String,
    pub tracks: Vec<NewSong>,
}

/// The entity on the receiving end of a like or dislike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Album(AlbumId),
    Song(SongId),
    Artist(UserId),
}

impl fmt::Display for LikeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikeTarget::Album(id) => write!(f, "album {}", id),
            LikeTarget::Song(id) => write!(f, "song {}", id),
            LikeTarget::Artist(id) => write!(f, "artist {}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Username,
}

/// Full replacement contents for all four collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    pub users: Vec<User>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub playlists: Vec<Playlist>,
}

/// One `(name, metric)` line of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct RankEntry {
    pub name: String,
    pub metric: u64,
}

#[derive(Tabled)]
pub struct UserTableRow {
    pub username: String,
    pub name: String,
    pub email: String,
    #[tabled(rename = "type")]
    pub kind: String,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: SongId,
    pub name: String,
    pub duration: String,
    pub played: u64,
    pub liked: i64,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: AlbumId,
    pub name: String,
    pub genre: String,
    pub published: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub tracks: usize,
}
