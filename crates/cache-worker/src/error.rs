//! Worker Errors

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkerError {
    /// Cache store open/read/write failed
    #[error("cache error: {0}")]
    Cache(String),
    /// Request never produced a response (offline, DNS, CORS...)
    #[error("network error: {0}")]
    Network(String),
    /// Precache got a response it refuses to store
    #[error("bad response for {url}: status {status}")]
    BadStatus { url: String, status: u16 },
    /// Anything thrown by the JS platform
    #[error("platform error: {0}")]
    Js(String),
}
