use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{OptionStore, StoreError, StoreResult};

/// Keeps options in process. Used when no store URL is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    options: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options<I: IntoIterator<Item = S>, S: Into<String>>(options: I) -> Self {
        Self {
            options: Mutex::new(options.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl OptionStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<String>> {
        Ok(self.options.lock().await.clone())
    }

    async fn add(&self, text: &str) -> StoreResult<()> {
        if text.is_empty() {
            return Err(StoreError::BadRequest("missing field `texto`".into()));
        }
        self.options.lock().await.push(text.to_string());
        Ok(())
    }

    async fn remove(&self, text: &str) -> StoreResult<()> {
        if text.is_empty() {
            return Err(StoreError::BadRequest("missing field `texto`".into()));
        }
        self.options.lock().await.retain(|option| option != text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = MemoryStore::new();
        store.add("b").await.unwrap();
        store.add("a").await.unwrap();
        assert_eq!(vec!["b", "a"], store.list().await.unwrap());
    }

    #[tokio::test]
    async fn remove_drops_every_duplicate() {
        let store = MemoryStore::with_options(["x", "y", "x"]);
        store.remove("x").await.unwrap();
        assert_eq!(vec!["y"], store.list().await.unwrap());

        store.remove("missing").await.unwrap();
        assert_eq!(vec!["y"], store.list().await.unwrap());
    }

    #[tokio::test]
    async fn empty_text_is_a_bad_request() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.add("").await,
            Err(StoreError::BadRequest(_))
        ));
    }
}
