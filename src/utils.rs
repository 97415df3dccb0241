use crate::types::{
    Album, AlbumTableRow, NewSong, Playlist, PlaylistTableRow, Song, SongTableRow, User,
    UserTableRow,
};

/// Sorts `items` by `metric` highest first and keeps the first `n`.
/// The sort is stable, so items with equal metrics keep their input order.
pub fn rank_descending<T, F>(mut items: Vec<T>, n: usize, metric: F) -> Vec<T>
where
    F: Fn(&T) -> u64,
{
    items.sort_by(|a, b| metric(b).cmp(&metric(a)));
    items.truncate(n);
    items
}

/// Parses a `NAME|DURATION|LINK` track description from the command line.
pub fn parse_track_arg(s: &str) -> Result<NewSong, String> {
    let parts: Vec<&str> = s.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, duration, link] if !name.is_empty() && !duration.is_empty() && !link.is_empty() => {
            Ok(NewSong {
                name: name.to_string(),
                duration: duration.to_string(),
                link: link.to_string(),
            })
        }
        _ => Err(format!(
            "Invalid track: '{}'. Expected NAME|DURATION|LINK",
            s
        )),
    }
}

/// Collapses line breaks into spaces.
pub fn single_line(s: &str) -> String {
    s.split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn user_rows(users: &[User]) -> Vec<UserTableRow> {
    users
        .iter()
        .map(|u| UserTableRow {
            username: u.username.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            kind: u.kind.to_string(),
        })
        .collect()
}

pub fn song_rows(songs: &[Song]) -> Vec<SongTableRow> {
    songs
        .iter()
        .map(|s| SongTableRow {
            id: s.id,
            name: s.name.clone(),
            duration: s.duration.clone(),
            played: s.played,
            liked: s.liked,
        })
        .collect()
}

pub fn album_rows(albums: &[Album]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .map(|a| AlbumTableRow {
            id: a.id,
            name: a.name.clone(),
            genre: a.genre.clone(),
            published: a.published.clone(),
            tracks: a.tracklist.len(),
        })
        .collect()
}

pub fn playlist_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            tracks: p.tracks.len(),
        })
        .collect()
}
