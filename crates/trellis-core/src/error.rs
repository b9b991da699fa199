//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Nav error: {0}")]
    Nav(#[from] trellis_nav::NavError),

    #[error("Time error: {0}")]
    Time(#[from] trellis_timepicker::TimeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tab set not initialized")]
    NotInitialized,

    #[error("Tab set already initialized")]
    AlreadyInitialized,

    #[error("Tab set destroyed")]
    Destroyed,
}
