//! Whole-collection persistence.
//!
//! Each of the four collections is read and written as one JSON document.
//! [`CollectionStore`] is the raw backend seam; [`Store`] adds the typed
//! encoding on top of it.

use std::{
    collections::HashMap,
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{CatalogError, Result},
    ids::Entity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Albums,
    Songs,
    Playlists,
}

impl Collection {
    /// Lock acquisition order for multi-collection operations.
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Albums,
        Collection::Songs,
        Collection::Playlists,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Albums => "albums",
            Collection::Songs => "songs",
            Collection::Playlists => "playlists",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw storage for encoded collections.
///
/// `read` returns `Ok(None)` for a collection that has never been written.
/// `write` replaces the whole collection; the last completed write wins.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn read(&self, collection: Collection) -> Result<Option<String>>;
    async fn write(&self, collection: Collection, contents: String) -> Result<()>;
}

/// One `<name>.json` file per collection under a root directory.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        match async_fs::read_to_string(self.path(collection)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CatalogError::Io { collection, source }),
        }
    }

    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        let io_err = |source| CatalogError::Io { collection, source };

        async_fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let path = self.path(collection);
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, contents).await.map_err(io_err)?;
        async_fs::rename(&tmp, &path).await.map_err(io_err)
    }
}

/// Process-local store, used for tests and throwaway catalogs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(&collection).cloned())
    }

    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.insert(collection, contents);
        Ok(())
    }
}

/// Typed access to a [`CollectionStore`].
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn CollectionStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn CollectionStore>) -> Self {
        Self { backend }
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn json_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(root)))
    }

    /// Loads every record of `T`'s collection in stored order.
    pub async fn load<T: Entity + DeserializeOwned>(&self) -> Result<Vec<T>> {
        let collection = T::COLLECTION;
        let json = self
            .backend
            .read(collection)
            .await?
            .ok_or_else(|| CatalogError::not_found("collection", collection))?;

        serde_json::from_str(&json).map_err(|source| CatalogError::Malformed { collection, source })
    }

    /// Overwrites `T`'s collection with `items`.
    pub async fn save<T: Entity + Serialize>(&self, items: &[T]) -> Result<()> {
        let collection = T::COLLECTION;
        let json = serde_json::to_string_pretty(items)
            .map_err(|source| CatalogError::Encode { collection, source })?;
        self.backend.write(collection, json).await
    }

    pub async fn is_initialized(&self, collection: Collection) -> Result<bool> {
        Ok(self.backend.read(collection).await?.is_some())
    }
}
