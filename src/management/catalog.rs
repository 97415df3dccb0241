use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::{CatalogError, Result},
    ids::Entity,
    store::{Collection, Store},
    types::{Album, Playlist, Seed, Song, User},
};

/// Repository over the four collections.
///
/// Every read-modify-write cycle runs while holding the lock of each
/// collection it touches, so mutations of any one collection are serialized
/// within the process. Reads go straight to the store and always see the
/// latest saved contents.
pub struct Catalog {
    store: Store,
    users: Mutex<()>,
    albums: Mutex<()>,
    songs: Mutex<()>,
    playlists: Mutex<()>,
}

impl Catalog {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            users: Mutex::new(()),
            albums: Mutex::new(()),
            songs: Mutex::new(()),
            playlists: Mutex::new(()),
        }
    }

    /// Catalog over a fresh in-memory store with all collections empty.
    pub async fn in_memory() -> Result<Self> {
        let catalog = Self::new(Store::memory());
        catalog.init_empty().await?;
        Ok(catalog)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn lock_for(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Users => &self.users,
            Collection::Albums => &self.albums,
            Collection::Songs => &self.songs,
            Collection::Playlists => &self.playlists,
        }
    }

    /// Locks `collections` in the global order. Duplicates are ignored.
    async fn lock_all(&self, collections: &[Collection]) -> Vec<MutexGuard<'_, ()>> {
        let mut guards = Vec::with_capacity(collections.len());
        for collection in Collection::ALL {
            if collections.contains(&collection) {
                guards.push(self.lock_for(collection).lock().await);
            }
        }
        guards
    }

    pub(crate) async fn read<T: Entity + DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.store.load().await
    }

    /// One read-modify-write cycle on `T`'s collection. Nothing is saved when
    /// `apply` fails or leaves the records unchanged.
    pub(crate) async fn update<T, R, F>(&self, apply: F) -> Result<R>
    where
        T: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let _guard = self.lock_for(T::COLLECTION).lock().await;

        let mut items: Vec<T> = self.store.load().await?;
        let before = items.clone();
        let out = apply(&mut items)?;

        if items != before {
            self.store.save(&items).await?;
        }
        Ok(out)
    }

    /// Read-modify-write over two collections committed as one unit.
    ///
    /// Both collections are loaded and mutated in memory, then saved `A`
    /// first. If saving `B` fails, `A` is written back from its snapshot and
    /// the original error is returned. Should that rollback write fail too,
    /// the error is [`CatalogError::RollbackFailed`] and `A` keeps the new
    /// contents while `B` keeps the old ones.
    pub(crate) async fn update_pair<A, B, R, F>(&self, apply: F) -> Result<R>
    where
        A: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        B: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        F: FnOnce(&mut Vec<A>, &mut Vec<B>) -> Result<R>,
    {
        let _guards = self.lock_all(&[A::COLLECTION, B::COLLECTION]).await;
        self.commit_pair(apply).await
    }

    /// Like [`Catalog::update_pair`], but also locks `C` and hands `apply` a
    /// snapshot of it loaded under that lock. `C` is never written, so checks
    /// made against it stay true until the pair is committed.
    pub(crate) async fn update_pair_checked<C, A, B, R, F>(&self, apply: F) -> Result<R>
    where
        C: Entity + DeserializeOwned,
        A: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        B: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        F: FnOnce(&[C], &mut Vec<A>, &mut Vec<B>) -> Result<R>,
    {
        let _guards = self
            .lock_all(&[C::COLLECTION, A::COLLECTION, B::COLLECTION])
            .await;

        let context: Vec<C> = self.store.load().await?;
        self.commit_pair(|first, second| apply(&context, first, second))
            .await
    }

    /// Loads, mutates and saves `A` and `B`. Callers hold both locks.
    async fn commit_pair<A, B, R, F>(&self, apply: F) -> Result<R>
    where
        A: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        B: Entity + Serialize + DeserializeOwned + Clone + PartialEq,
        F: FnOnce(&mut Vec<A>, &mut Vec<B>) -> Result<R>,
    {
        let mut first: Vec<A> = self.store.load().await?;
        let mut second: Vec<B> = self.store.load().await?;
        let first_before = first.clone();
        let second_before = second.clone();

        let out = apply(&mut first, &mut second)?;

        let first_changed = first != first_before;
        if first_changed {
            self.store.save(&first).await?;
        }
        if second != second_before {
            if let Err(err) = self.store.save(&second).await {
                if first_changed {
                    if let Err(rollback) = self.store.save(&first_before).await {
                        return Err(CatalogError::RollbackFailed {
                            committed: A::COLLECTION,
                            failed: Box::new(err),
                            rollback: Box::new(rollback),
                        });
                    }
                }
                return Err(err);
            }
        }
        Ok(out)
    }

    /// Initializes every collection that has never been written as empty.
    pub async fn init_empty(&self) -> Result<()> {
        let _guards = self.lock_all(&Collection::ALL).await;

        if !self.store.is_initialized(Collection::Users).await? {
            self.store.save::<User>(&[]).await?;
        }
        if !self.store.is_initialized(Collection::Albums).await? {
            self.store.save::<Album>(&[]).await?;
        }
        if !self.store.is_initialized(Collection::Songs).await? {
            self.store.save::<Song>(&[]).await?;
        }
        if !self.store.is_initialized(Collection::Playlists).await? {
            self.store.save::<Playlist>(&[]).await?;
        }
        Ok(())
    }

    /// Replaces the full contents of all four collections.
    ///
    /// Collections are written one after the other; a failure part way leaves
    /// the earlier collections replaced.
    pub async fn replace_collections(&self, seed: &Seed) -> Result<()> {
        let _guards = self.lock_all(&Collection::ALL).await;

        self.store.save(&seed.users).await?;
        self.store.save(&seed.albums).await?;
        self.store.save(&seed.songs).await?;
        self.store.save(&seed.playlists).await
    }
}
