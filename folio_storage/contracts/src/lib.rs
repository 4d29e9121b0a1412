use std::{fmt::Debug, future::Future};

use serde::{de::DeserializeOwned, Serialize};

/// Durable key-value storage that survives restarts, the counterpart of a
/// browser's local storage.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait KeyValueStore: Sized + Send + Sync + 'static {
    /// Reads an item.
    fn get<T: DeserializeOwned + Debug + Send + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Creates a new or replaces an existing item.
    fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes an existing item.
    ///
    /// Does nothing if the item does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockKeyValueStore {
    pub fn with_get<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_error<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
    ) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "storage is unavailable"
                ))))
            });
        self
    }

    pub fn with_set<T: Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        result: bool,
    ) -> Self {
        self.expect_set::<T>()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::eq(value))
            .return_once(move |_, _| {
                Box::pin(std::future::ready(
                    result
                        .then_some(())
                        .ok_or_else(|| anyhow::anyhow!("storage is read-only")),
                ))
            });
        self
    }

    pub fn with_remove(mut self, key: String) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
