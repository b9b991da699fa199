//! Time error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Incomplete time: {0}")]
    Incomplete(String),

    #[error("Time out of range: {hour}:{minute}:{second}")]
    OutOfRange { hour: i32, minute: i32, second: i32 },
}
