use clap::ValueEnum;

use crate::{error, info, management::Catalog, success, types::LikeTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Album,
    Song,
    Artist,
}

/// Albums and songs are addressed by id, artists by username.
async fn resolve_target(catalog: &Catalog, kind: TargetKind, target: &str) -> LikeTarget {
    let parse_id = |target: &str| match target.parse::<u32>() {
        Ok(id) => id,
        Err(_) => error!("Invalid {:?} id: '{}'", kind, target),
    };

    match kind {
        TargetKind::Album => LikeTarget::Album(parse_id(target)),
        TargetKind::Song => LikeTarget::Song(parse_id(target)),
        TargetKind::Artist => match catalog.find_by_username(target).await {
            Ok(artist) => LikeTarget::Artist(artist.id),
            Err(e) => error!("Cannot load artist {}. Err: {}", target, e),
        },
    }
}

/// Likes `target` as the user named `username`.
pub async fn like(catalog: &Catalog, username: &str, kind: TargetKind, target: &str) {
    let actor = match catalog.find_by_username(username).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user {}. Err: {}", username, e),
    };
    let target_ref = resolve_target(catalog, kind, target).await;

    match catalog.like(&actor.id, &target_ref).await {
        Ok(true) => success!("{} likes {}", actor.username, target_ref),
        Ok(false) => info!("{} already likes {}", actor.username, target_ref),
        Err(e) => error!("Cannot like {}. Err: {}", target_ref, e),
    }
}

/// Removes a like of `target` by the user named `username`.
pub async fn dislike(catalog: &Catalog, username: &str, kind: TargetKind, target: &str) {
    let actor = match catalog.find_by_username(username).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user {}. Err: {}", username, e),
    };
    let target_ref = resolve_target(catalog, kind, target).await;

    match catalog.dislike(&actor.id, &target_ref).await {
        Ok(true) => success!("{} no longer likes {}", actor.username, target_ref),
        Ok(false) => info!("{} did not like {}", actor.username, target_ref),
        Err(e) => error!("Cannot dislike {}. Err: {}", target_ref, e),
    }
}
