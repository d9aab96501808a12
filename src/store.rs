//! Clients for the remote option store.

mod http;
mod memory;

use async_trait::async_trait;

pub use http::HttpStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("store is unavailable: {0}")]
    Unavailable(String),
    #[error("no response within {0:?}")]
    Timeout(std::time::Duration),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("malformed option list: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The authoritative list of wheel options.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// All options in store order.
    async fn list(&self) -> StoreResult<Vec<String>>;

    async fn add(&self, text: &str) -> StoreResult<()>;

    /// Removes every option equal to `text`.
    async fn remove(&self, text: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S: OptionStore + ?Sized> OptionStore for std::sync::Arc<S> {
    async fn list(&self) -> StoreResult<Vec<String>> {
        (**self).list().await
    }

    async fn add(&self, text: &str) -> StoreResult<()> {
        (**self).add(text).await
    }

    async fn remove(&self, text: &str) -> StoreResult<()> {
        (**self).remove(text).await
    }
}
