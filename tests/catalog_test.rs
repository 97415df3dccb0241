//! Integration tests for accounts, catalog creation and persistence.

mod test_helpers;

use std::collections::HashSet;

use test_helpers::*;
use tunedex::{
    error::CatalogError,
    management::Catalog,
    store::{Collection, Store},
    types::{LikeTarget, NewAlbum, ProfileField, Song, User, UserType},
};

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let catalog = catalog().await;
    listener(&catalog, "ana").await;

    let err = catalog
        .register_user("Other Ana", "other@example.com", "ana", UserType::Musician)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::DuplicateUsername(name) if name == "ana"));
    assert_eq!(catalog.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let catalog = catalog().await;

    let err = catalog
        .register_user("  ", "a@example.com", "a", UserType::Listener)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Validation(_)));
    assert!(!catalog.username_exists("a").await.unwrap());
}

#[tokio::test]
async fn test_new_user_has_fresh_empty_sets() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    let first = listener(&catalog, "first").await;
    let second = listener(&catalog, "second").await;
    let album = album_with_songs(&catalog, &artist, "A", &["s"]).await;

    catalog.like(&first.id, &LikeTarget::Album(album.id)).await.unwrap();

    let second = catalog.find_user(&second.id).await.unwrap();
    assert!(second.liked_albums.is_empty());
    assert!(second.liked_songs.is_empty());
    assert!(second.liked_artists.is_empty());
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_edit_profile_fields() {
    let catalog = catalog().await;
    let user = listener(&catalog, "ana").await;
    listener(&catalog, "taken").await;

    let edited = catalog
        .edit_profile(&user.id, ProfileField::Email, "new@example.com")
        .await
        .unwrap();
    assert_eq!(edited.email, "new@example.com");

    let err = catalog
        .edit_profile(&user.id, ProfileField::Username, "taken")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateUsername(_)));

    // keeping the current username is not a collision
    catalog
        .edit_profile(&user.id, ProfileField::Username, "ana")
        .await
        .unwrap();

    let renamed = catalog
        .edit_profile(&user.id, ProfileField::Username, "ana2")
        .await
        .unwrap();
    assert_eq!(renamed.id, user.id);
    assert!(catalog.find_by_username("ana").await.unwrap_err().is_not_found());
    assert_eq!(catalog.find_by_username("ana2").await.unwrap().email, "new@example.com");
}

#[tokio::test]
async fn test_search_users_excludes_caller() {
    let catalog = catalog().await;
    catalog
        .register_user("Maria Lopez", "m@example.com", "maria", UserType::Listener)
        .await
        .unwrap();
    catalog
        .register_user("Mariana Diaz", "md@example.com", "mariana", UserType::Musician)
        .await
        .unwrap();

    let found = catalog.search_users("MARIA", Some("maria")).await.unwrap();
    assert_eq!(
        found.iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
        vec!["mariana"]
    );
    assert_eq!(catalog.search_artists("maria").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_ids_are_distinct_per_collection() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    album_with_songs(&catalog, &artist, "A", &["a1", "a2"]).await;
    album_with_songs(&catalog, &artist, "B", &["b1"]).await;
    catalog.create_song(&new_song("single")).await.unwrap();
    catalog.create_playlist(&artist.id, "P1", "", &[1, 2]).await.unwrap();
    catalog.create_playlist(&artist.id, "P2", "", &[4]).await.unwrap();

    let songs: Vec<Song> = catalog.store().load().await.unwrap();
    let ids: HashSet<u32> = songs.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), songs.len());
    assert_eq!(songs.len(), 4);

    let albums = catalog.albums_of(&artist.id).await.unwrap();
    assert_ne!(albums[0].id, albums[1].id);

    let playlists = catalog.playlists_of(&artist.id).await.unwrap();
    assert_eq!(playlists.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[tokio::test]
async fn test_concurrent_song_creation_never_collides() {
    let catalog = std::sync::Arc::new(catalog().await);

    let mut handles = Vec::new();
    for i in 0..10 {
        let catalog = std::sync::Arc::clone(&catalog);
        handles.push(tokio::spawn(async move {
            catalog.create_song(&new_song(&format!("s{}", i))).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_create_album_requires_musician() {
    let catalog = catalog().await;
    let fan = listener(&catalog, "fan").await;

    let album = NewAlbum {
        name: "Nope".to_string(),
        description: String::new(),
        cover: String::new(),
        published: "2024-01-01".to_string(),
        genre: "pop".to_string(),
        tracks: vec![new_song("x")],
    };

    assert!(matches!(
        catalog.create_album(&fan.id, &album).await,
        Err(CatalogError::Validation(_))
    ));
    assert!(catalog.create_album("missing", &album).await.unwrap_err().is_not_found());
    assert!(catalog.search_songs("x").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_album_songs_keep_tracklist_order() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    let album = album_with_songs(&catalog, &artist, "Ordered", &["first", "second", "third"]).await;

    let songs = catalog.album_songs(&album).await.unwrap();
    assert_eq!(
        songs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert!(songs.iter().all(|s| s.played == 0 && s.liked == 0));
    assert_eq!(catalog.album_artist(&album).await.unwrap().id, artist.id);
}

#[tokio::test]
async fn test_create_playlist_validates_tracks() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    let fan = listener(&catalog, "fan").await;
    let album = album_with_songs(&catalog, &artist, "A", &["one", "two"]).await;

    let err = catalog
        .create_playlist(&fan.id, "Mix", "mine", &[album.tracklist[0], 99])
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let playlist = catalog
        .create_playlist(&fan.id, "Mix", "mine", &[album.tracklist[1], album.tracklist[0]])
        .await
        .unwrap();
    let tracks = catalog.playlist_tracks(&playlist).await.unwrap();
    assert_eq!(
        tracks.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["two", "one"]
    );

    let fan = catalog.find_user(&fan.id).await.unwrap();
    assert_eq!(fan.playlists, vec![playlist.id]);
    assert_eq!(catalog.search_playlists("mix").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_play_song_counts_and_missing_song() {
    let catalog = catalog().await;
    let song = catalog.create_song(&new_song("solo")).await.unwrap();

    assert_eq!(catalog.play_song(song.id).await.unwrap().played, 1);
    assert_eq!(catalog.play_song(song.id).await.unwrap().played, 2);
    assert!(catalog.play_song(404).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_user_orphans_authored_albums() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    let album = album_with_songs(&catalog, &artist, "A", &["one"]).await;
    let playlist = catalog
        .create_playlist(&artist.id, "Own", "", &album.tracklist)
        .await
        .unwrap();

    let deleted = catalog.delete_user(&artist.id).await.unwrap();

    assert_eq!(deleted.orphaned_albums, vec![album.id]);
    assert_eq!(deleted.orphaned_playlists, vec![playlist.id]);
    assert!(catalog.find_user(&artist.id).await.unwrap_err().is_not_found());

    // the album survives and still points at the removed id
    let album = catalog.find_album(album.id).await.unwrap();
    assert_eq!(album.artist, artist.id);
    assert!(catalog.album_artist(&album).await.unwrap_err().is_not_found());

    let report = catalog.audit().await.unwrap();
    let fields: Vec<&str> = report.dangling.iter().map(|d| d.field).collect();
    assert_eq!(fields, vec!["artist", "creator"]);
}

#[tokio::test]
async fn test_delete_missing_user() {
    let catalog = catalog().await;
    assert!(catalog.delete_user("nobody").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_uninitialized_catalog_reports_not_found() {
    let catalog = Catalog::new(Store::memory());

    let err = catalog.list_users().await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "collection", .. }));

    catalog.init_empty().await.unwrap();
    assert!(catalog.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_album_write_rolls_back_songs() {
    let (catalog, backend) = flaky_catalog(Collection::Songs).await;
    let artist = musician(&catalog, "artist").await;

    backend.set_failing(true);
    let album = NewAlbum {
        name: "Lost".to_string(),
        description: String::new(),
        cover: String::new(),
        published: "2024-01-01".to_string(),
        genre: "pop".to_string(),
        tracks: vec![new_song("gone")],
    };
    assert!(catalog.create_album(&artist.id, &album).await.unwrap_err().is_io_failure());
    backend.set_failing(false);

    assert!(catalog.albums_of(&artist.id).await.unwrap().is_empty());
    assert!(catalog.search_songs("gone").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_json_dir_catalog_persists_between_instances() {
    let dir = tempfile::tempdir().unwrap();

    let user_id = {
        let catalog = Catalog::new(Store::json_dir(dir.path()));
        catalog.init_empty().await.unwrap();
        let artist = musician(&catalog, "artist").await;
        let album = album_with_songs(&catalog, &artist, "Kept", &["k"]).await;
        catalog.play_song(album.tracklist[0]).await.unwrap();
        artist.id
    };

    let reopened = Catalog::new(Store::json_dir(dir.path()));
    let artist: User = reopened.find_user(&user_id).await.unwrap();
    assert_eq!(reopened.total_played(&artist).await.unwrap(), 1);

    let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(raw.contains("\"liked_songs\""));
    assert!(raw.contains("\"type\": \"musician\""));
}

#[tokio::test]
async fn test_reads_legacy_field_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("users.json"),
        r#"[{"id": "u1", "name": "Old", "email": "o@example.com", "username": "old",
             "type": "listener", "liked_albums": [1], "songs_liked": [2, 2],
             "playlists": [], "artists_liked": ["m1"]}]"#,
    )
    .unwrap();

    let catalog = Catalog::new(Store::json_dir(dir.path()));
    let user = catalog.find_by_username("old").await.unwrap();

    assert_eq!(user.liked_songs.len(), 1);
    assert!(user.liked_songs.contains(&2));
    assert!(user.liked_artists.contains("m1"));
}

#[tokio::test]
async fn test_delete_during_album_creation_cannot_strand_album() {
    let (catalog, backend) = gated_catalog(Collection::Albums).await;
    let artist = musician(&catalog, "artist").await;

    backend.arm();
    let creating = {
        let catalog = std::sync::Arc::clone(&catalog);
        let artist_id = artist.id.clone();
        tokio::spawn(async move {
            let album = NewAlbum {
                name: "Racing".to_string(),
                description: String::new(),
                cover: String::new(),
                published: "2024-01-01".to_string(),
                genre: "rock".to_string(),
                tracks: vec![new_song("r1")],
            };
            catalog.create_album(&artist_id, &album).await
        })
    };

    // album creation is now parked on its albums read
    backend.entered.notified().await;
    let deleting = {
        let catalog = std::sync::Arc::clone(&catalog);
        let artist_id = artist.id.clone();
        tokio::spawn(async move { catalog.delete_user(&artist_id).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    backend.release();

    let album = creating.await.unwrap().unwrap();
    let deleted = deleting.await.unwrap().unwrap();

    // the delete waited for the album commit and sees it
    assert_eq!(album.artist, artist.id);
    assert_eq!(deleted.orphaned_albums, vec![album.id]);
}

#[tokio::test]
async fn test_album_for_deleted_artist_is_rejected() {
    let catalog = catalog().await;
    let artist = musician(&catalog, "artist").await;
    catalog.delete_user(&artist.id).await.unwrap();

    let album = NewAlbum {
        name: "Late".to_string(),
        description: String::new(),
        cover: String::new(),
        published: "2024-01-01".to_string(),
        genre: "rock".to_string(),
        tracks: vec![new_song("late")],
    };

    assert!(catalog.create_album(&artist.id, &album).await.unwrap_err().is_not_found());
    assert!(catalog.search_songs("late").await.unwrap().is_empty());
}
