//! Error type shared by the catalog library.

use thiserror::Error;

use crate::store::Collection;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A referenced id is absent from its collection, or the collection itself
    /// has never been initialized.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("cannot access {collection} collection: {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    #[error("{collection} collection is malformed: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode {collection} collection: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// A two-collection write failed and restoring the first collection
    /// failed as well. `committed` now holds the new contents while the
    /// other collection holds the old ones.
    #[error("{failed}; restoring {committed} also failed: {rollback}")]
    RollbackFailed {
        committed: Collection,
        failed: Box<CatalogError>,
        rollback: Box<CatalogError>,
    },

    #[error("bootstrap request failed: {0}")]
    Bootstrap(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors reading, decoding, encoding or writing a collection.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Malformed { .. }
                | Self::Encode { .. }
                | Self::RollbackFailed { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
