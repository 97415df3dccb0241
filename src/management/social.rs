//! Likes between users and albums, songs and artists.
//!
//! Liked sets on `User` have set semantics: liking twice stores the id once.
//! Song likes also move the song's `liked` counter, in the same transaction as
//! the actor's liked set.

use crate::{
    error::{CatalogError, Result},
    types::{Album, LikeTarget, Song, User},
};

use super::{Catalog, library::resolve_songs, users::find_user_mut};

impl Catalog {
    /// Adds `target` to the actor's liked set. Returns `false` when it was
    /// already liked, in which case nothing changes.
    pub async fn like(&self, actor_id: &str, target: &LikeTarget) -> Result<bool> {
        match target {
            LikeTarget::Album(album_id) => {
                self.find_album(*album_id).await?;
                self.update::<User, _, _>(|users| {
                    Ok(find_user_mut(users, actor_id)?.liked_albums.insert(*album_id))
                })
                .await
            }
            LikeTarget::Song(song_id) => {
                self.update_pair::<User, Song, _, _>(|users, songs| {
                    let song = songs
                        .iter_mut()
                        .find(|s| s.id == *song_id)
                        .ok_or_else(|| CatalogError::not_found("song", song_id))?;
                    let actor = find_user_mut(users, actor_id)?;

                    if !actor.liked_songs.insert(*song_id) {
                        return Ok(false);
                    }
                    song.liked += 1;
                    Ok(true)
                })
                .await
            }
            LikeTarget::Artist(artist_id) => {
                self.update::<User, _, _>(|users| {
                    let artist = users
                        .iter()
                        .find(|u| u.id == *artist_id)
                        .ok_or_else(|| CatalogError::not_found("user", artist_id))?;
                    if !artist.is_musician() {
                        return Err(CatalogError::validation(format!(
                            "{} is not a musician",
                            artist.username
                        )));
                    }

                    let actor = find_user_mut(users, actor_id)?;
                    Ok(actor.liked_artists.insert(artist_id.clone()))
                })
                .await
            }
        }
    }

    /// Removes `target` from the actor's liked set. Returns `false` when it
    /// was not liked; the song counter is only touched when the id was
    /// actually removed and never drops below zero.
    pub async fn dislike(&self, actor_id: &str, target: &LikeTarget) -> Result<bool> {
        match target {
            LikeTarget::Album(album_id) => {
                self.update::<User, _, _>(|users| {
                    Ok(find_user_mut(users, actor_id)?.liked_albums.remove(album_id))
                })
                .await
            }
            LikeTarget::Song(song_id) => {
                self.update_pair::<User, Song, _, _>(|users, songs| {
                    let song = songs
                        .iter_mut()
                        .find(|s| s.id == *song_id)
                        .ok_or_else(|| CatalogError::not_found("song", song_id))?;
                    let actor = find_user_mut(users, actor_id)?;

                    if !actor.liked_songs.remove(song_id) {
                        return Ok(false);
                    }
                    song.liked = (song.liked - 1).max(0);
                    Ok(true)
                })
                .await
            }
            LikeTarget::Artist(artist_id) => {
                self.update::<User, _, _>(|users| {
                    Ok(find_user_mut(users, actor_id)?.liked_artists.remove(artist_id))
                })
                .await
            }
        }
    }

    pub async fn is_liked(&self, actor_id: &str, target: &LikeTarget) -> Result<bool> {
        let actor = self.find_user(actor_id).await?;
        Ok(match target {
            LikeTarget::Album(id) => actor.liked_albums.contains(id),
            LikeTarget::Song(id) => actor.liked_songs.contains(id),
            LikeTarget::Artist(id) => actor.liked_artists.contains(id),
        })
    }

    /// Flips the like state of `target` and returns the new state.
    pub async fn toggle_like(&self, actor_id: &str, target: &LikeTarget) -> Result<bool> {
        if self.is_liked(actor_id, target).await? {
            self.dislike(actor_id, target).await?;
            Ok(false)
        } else {
            self.like(actor_id, target).await?;
            Ok(true)
        }
    }

    pub async fn liked_albums(&self, user: &User) -> Result<Vec<Album>> {
        let albums: Vec<Album> = self.read().await?;
        Ok(albums
            .into_iter()
            .filter(|a| user.liked_albums.contains(&a.id))
            .collect())
    }

    pub async fn liked_songs(&self, user: &User) -> Result<Vec<Song>> {
        let songs: Vec<Song> = self.read().await?;
        let ids: Vec<_> = user.liked_songs.iter().copied().collect();
        Ok(resolve_songs(&ids, &songs))
    }

    pub async fn liked_artists(&self, user: &User) -> Result<Vec<User>> {
        let users: Vec<User> = self.read().await?;
        Ok(users
            .into_iter()
            .filter(|u| user.liked_artists.contains(&u.id))
            .collect())
    }
}
