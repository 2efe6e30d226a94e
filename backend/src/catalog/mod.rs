//! Catalog editing operations and read-side views.
//!
//! Editing functions validate everything before touching the catalog, so a
//! returned `CatalogError` always means the catalog is unchanged. Callers
//! persist the edited catalog with `CatalogStore::save`.

pub mod edit;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("category id must contain only letters and numbers: {0:?}")]
    InvalidCategoryId(String),

    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("category {id} still has {channels} channel(s)")]
    CategoryInUse { id: String, channels: usize },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("channel already registered: {0}")]
    DuplicateChannel(String),

    #[error("channel not found: {0}")]
    ChannelNotFound(String),
}
