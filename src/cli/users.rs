use tabled::Table;

use crate::{
    error, info,
    management::Catalog,
    success,
    types::{LikeTarget, ProfileField, User, UserType},
    utils, warning,
};

async fn load_user(catalog: &Catalog, username: &str) -> User {
    match catalog.find_by_username(username).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user {}. Err: {}", username, e),
    }
}

/// Registers an account and prints it.
pub async fn register(catalog: &Catalog, name: &str, email: &str, username: &str, kind: UserType) {
    match catalog.register_user(name, email, username, kind).await {
        Ok(user) => success!("Created user {}", user),
        Err(e) => error!("Cannot register user. Err: {}", e),
    }
}

/// Prints a profile. Musicians also get their albums, likes and plays.
pub async fn show_user(catalog: &Catalog, username: &str) {
    let user = load_user(catalog, username).await;

    info!("{}", user);
    info!("Email: {}", user.email);

    let likes = catalog
        .like_count(&LikeTarget::Artist(user.id.clone()))
        .await
        .unwrap_or_else(|e| error!("Cannot count likes. Err: {}", e));

    if user.is_musician() {
        info!("Liked by {} users", likes);

        let albums = match catalog.albums_of(&user.id).await {
            Ok(albums) => albums,
            Err(e) => error!("Cannot load albums. Err: {}", e),
        };
        if !albums.is_empty() {
            println!("{}", Table::new(utils::album_rows(&albums)));
        }

        match catalog.total_played(&user).await {
            Ok(total) => info!("Total plays: {}", total),
            Err(e) => warning!("Cannot compute plays. Err: {}", e),
        }
    }

    match catalog.playlists_of(&user.id).await {
        Ok(playlists) if !playlists.is_empty() => {
            info!("Playlists:");
            println!("{}", Table::new(utils::playlist_rows(&playlists)));
        }
        Ok(_) => {}
        Err(e) => warning!("Cannot load playlists. Err: {}", e),
    }

    match catalog.liked_songs(&user).await {
        Ok(songs) if !songs.is_empty() => {
            info!("Liked songs:");
            println!("{}", Table::new(utils::song_rows(&songs)));
        }
        Ok(_) => {}
        Err(e) => warning!("Cannot load liked songs. Err: {}", e),
    }

    match catalog.liked_albums(&user).await {
        Ok(albums) if !albums.is_empty() => {
            info!("Liked albums:");
            println!("{}", Table::new(utils::album_rows(&albums)));
        }
        Ok(_) => {}
        Err(e) => warning!("Cannot load liked albums. Err: {}", e),
    }

    match catalog.liked_artists(&user).await {
        Ok(artists) if !artists.is_empty() => {
            info!("Liked artists:");
            println!("{}", Table::new(utils::user_rows(&artists)));
        }
        Ok(_) => {}
        Err(e) => warning!("Cannot load liked artists. Err: {}", e),
    }
}

/// Applies every given profile edit, stopping at the first failure.
pub async fn edit_user(
    catalog: &Catalog,
    username: &str,
    name: Option<String>,
    email: Option<String>,
    new_username: Option<String>,
) {
    let user = load_user(catalog, username).await;

    let edits = [
        (ProfileField::Name, name),
        (ProfileField::Email, email),
        (ProfileField::Username, new_username),
    ];

    let mut changed = false;
    for (field, value) in edits {
        let Some(value) = value else { continue };
        if let Err(e) = catalog.edit_profile(&user.id, field, &value).await {
            error!("Cannot edit {:?}. Err: {}", field, e);
        }
        changed = true;
    }

    if changed {
        success!("Profile updated.");
    } else {
        warning!("Nothing to update here.");
    }
}

/// Deletes an account after `--yes` and warns about orphaned records.
pub async fn delete_user(catalog: &Catalog, username: &str, yes: bool) {
    if !yes {
        warning!("Deleting {} cannot be undone. Re-run with --yes to confirm.", username);
        return;
    }

    let user = load_user(catalog, username).await;
    match catalog.delete_user(&user.id).await {
        Ok(deleted) => {
            success!("Deleted user {}", deleted.user.username);
            if !deleted.orphaned_albums.is_empty() || !deleted.orphaned_playlists.is_empty() {
                warning!(
                    "{} albums and {} playlists still reference the deleted user.",
                    deleted.orphaned_albums.len(),
                    deleted.orphaned_playlists.len()
                );
            }
        }
        Err(e) => error!("Cannot delete user. Err: {}", e),
    }
}

pub async fn search_users(catalog: &Catalog, query: &str, exclude: Option<String>) {
    match catalog.search_users(query, exclude.as_deref()).await {
        Ok(users) if users.is_empty() => warning!("No users match '{}'.", query),
        Ok(users) => println!("{}", Table::new(utils::user_rows(&users))),
        Err(e) => error!("Cannot search users. Err: {}", e),
    }
}
