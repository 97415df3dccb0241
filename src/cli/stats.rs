use tabled::Table;

use crate::{
    error, info,
    management::{Catalog, DEFAULT_LEADERBOARD_SIZE, DEFAULT_TOP_SONGS},
    types::RankEntry,
    utils, warning,
};

fn print_ranking(title: &str, entries: &[RankEntry]) {
    info!("{}", title);
    if entries.is_empty() {
        warning!("Nothing ranked yet.");
    } else {
        println!("{}", Table::new(entries));
    }
}

/// Prints the global leaderboards, or the top songs of one musician when
/// `artist` is given.
pub async fn stats(catalog: &Catalog, artist: Option<String>, limit: Option<usize>) {
    if let Some(username) = artist {
        let artist = match catalog.find_by_username(&username).await {
            Ok(user) => user,
            Err(e) => error!("Cannot load artist {}. Err: {}", username, e),
        };
        let limit = limit.unwrap_or(DEFAULT_TOP_SONGS);

        match catalog.total_played(&artist).await {
            Ok(total) => info!("{} has {} plays in total", artist.name, total),
            Err(e) => error!("Cannot compute plays. Err: {}", e),
        }
        match catalog.top_songs(&artist, limit).await {
            Ok(songs) => {
                info!("Top {} songs of {}", limit, artist.name);
                println!("{}", Table::new(utils::song_rows(&songs)));
            }
            Err(e) => error!("Cannot rank songs. Err: {}", e),
        }
        return;
    }

    let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE);
    let boards = match catalog.leaderboards(limit).await {
        Ok(boards) => boards,
        Err(e) => error!("Cannot compute statistics. Err: {}", e),
    };

    print_ranking(&format!("Top {} musicians by plays", limit), &boards.musicians);
    print_ranking(&format!("Top {} albums by streams", limit), &boards.albums);
    print_ranking(&format!("Top {} songs by plays", limit), &boards.songs);
}
