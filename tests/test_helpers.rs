//! Shared fixtures for the catalog integration tests.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::Notify;
use tunedex::{
    error::{CatalogError, Result},
    management::Catalog,
    store::{Collection, CollectionStore, MemoryStore, Store},
    types::{Album, NewAlbum, NewSong, User, UserType},
};

pub async fn catalog() -> Catalog {
    Catalog::in_memory().await.expect("Failed to create catalog")
}

pub async fn musician(catalog: &Catalog, username: &str) -> User {
    catalog
        .register_user(
            &format!("{} name", username),
            &format!("{}@example.com", username),
            username,
            UserType::Musician,
        )
        .await
        .expect("Failed to register musician")
}

pub async fn listener(catalog: &Catalog, username: &str) -> User {
    catalog
        .register_user(
            &format!("{} name", username),
            &format!("{}@example.com", username),
            username,
            UserType::Listener,
        )
        .await
        .expect("Failed to register listener")
}

pub fn new_song(name: &str) -> NewSong {
    NewSong {
        name: name.to_string(),
        duration: "3:00".to_string(),
        link: format!("https://example.com/{}", name),
    }
}

pub async fn album_with_songs(catalog: &Catalog, artist: &User, name: &str, songs: &[&str]) -> Album {
    catalog
        .create_album(
            &artist.id,
            &NewAlbum {
                name: name.to_string(),
                description: format!("{} description", name),
                cover: "https://example.com/cover.png".to_string(),
                published: "2024-05-01".to_string(),
                genre: "rock".to_string(),
                tracks: songs.iter().map(|s| new_song(s)).collect(),
            },
        )
        .await
        .expect("Failed to create album")
}

pub async fn play(catalog: &Catalog, song_id: u32, times: usize) {
    for _ in 0..times {
        catalog.play_song(song_id).await.expect("Failed to play song");
    }
}

/// Memory store whose writes can be made to fail per collection.
pub struct FlakyStore {
    inner: MemoryStore,
    default: Collection,
    // collection -> writes still allowed before failing
    budgets: Mutex<HashMap<Collection, usize>>,
}

impl FlakyStore {
    pub fn new(default: Collection) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            default,
            budgets: Mutex::new(HashMap::new()),
        })
    }

    /// Toggles failure of every write to the default collection.
    pub fn set_failing(&self, fail: bool) {
        if fail {
            self.fail_after(self.default, 0);
        } else {
            self.budgets.lock().unwrap().remove(&self.default);
        }
    }

    /// Lets `successes` more writes to `collection` through, then fails.
    pub fn fail_after(&self, collection: Collection, successes: usize) {
        self.budgets.lock().unwrap().insert(collection, successes);
    }

    pub fn heal(&self) {
        self.budgets.lock().unwrap().clear();
    }
}

#[async_trait]
impl CollectionStore for FlakyStore {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        self.inner.read(collection).await
    }

    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        {
            let mut budgets = self.budgets.lock().unwrap();
            if let Some(left) = budgets.get_mut(&collection) {
                if *left == 0 {
                    return Err(CatalogError::Io {
                        collection,
                        source: std::io::Error::other("disk full"),
                    });
                }
                *left -= 1;
            }
        }
        self.inner.write(collection, contents).await
    }
}

pub async fn flaky_catalog(failing: Collection) -> (Catalog, Arc<FlakyStore>) {
    let backend = FlakyStore::new(failing);
    let catalog = Catalog::new(Store::new(backend.clone()));
    catalog.init_empty().await.expect("Failed to init catalog");
    (catalog, backend)
}

/// Memory store that can hold the next read of one collection until
/// released.
pub struct GatedStore {
    inner: MemoryStore,
    gated: Collection,
    armed: AtomicBool,
    pub entered: Notify,
    release: Notify,
}

impl GatedStore {
    pub fn new(gated: Collection) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            gated,
            armed: AtomicBool::new(false),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// The next read of the gated collection signals `entered` and waits for
    /// `release`. Later reads pass straight through.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl CollectionStore for GatedStore {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        if collection == self.gated && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.read(collection).await
    }

    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        self.inner.write(collection, contents).await
    }
}

pub async fn gated_catalog(gated: Collection) -> (Arc<Catalog>, Arc<GatedStore>) {
    let backend = GatedStore::new(gated);
    let catalog = Catalog::new(Store::new(backend.clone()));
    catalog.init_empty().await.expect("Failed to init catalog");
    (Arc::new(catalog), backend)
}
