//! Nav error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("Nav item not found: {0}")]
    ItemNotFound(String),

    #[error("Duplicate nav item id: {0}")]
    DuplicateItem(String),

    #[error("Invalid nav item id: {0:?}")]
    InvalidId(String),
}
