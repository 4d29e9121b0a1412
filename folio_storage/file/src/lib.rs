use std::{
    fmt::Debug,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use folio_storage_contracts::KeyValueStore;
use folio_utils::trace_instrument;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::warn;

type Entries = Map<String, Value>;

/// Key-value store backed by a single JSON object on disk.
///
/// A missing file is an empty store. An unparsable file fails reads but is
/// replaced by the next write. Writes replace the file atomically via a
/// temporary file in the same directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> anyhow::Result<Entries> {
        let Some(data) = self.read_file().await? else {
            return Ok(Entries::new());
        };
        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse store file at {}", self.path.display()))
    }

    /// Like [`read`](Self::read), but an unparsable file is treated as an
    /// empty store so that writers can replace it.
    async fn read_for_update(&self) -> anyhow::Result<Entries> {
        let Some(data) = self.read_file().await? else {
            return Ok(Entries::new());
        };
        Ok(serde_json::from_slice(&data).unwrap_or_else(|err| {
            warn!(
                path = %self.path.display(),
                "Discarding unparsable store file: {err}"
            );
            Entries::new()
        }))
    }

    async fn read_file(&self) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read store file at {}", self.path.display())
            }),
        }
    }

    async fn write(&self, entries: &Entries) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let data = serde_json::to_vec_pretty(entries).context("Failed to serialize store")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, data)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace store file at {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    #[trace_instrument(skip(self))]
    async fn get<T: DeserializeOwned + Debug + Send + 'static>(
        &self,
        key: &str,
    ) -> anyhow::Result<Option<T>> {
        self.read()
            .await?
            .remove(key)
            .map(serde_json::from_value)
            .transpose()
            .context("Failed to deserialize stored value")
    }

    #[trace_instrument(skip(self))]
    async fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
    ) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).context("Failed to serialize value")?;

        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_for_update().await?;
        entries.insert(key.into(), value);
        self.write(&entries).await
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let Some(data) = self.read_file().await? else {
            return Ok(());
        };
        match serde_json::from_slice::<Entries>(&data) {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write(&entries).await?;
                }
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "Replacing unparsable store file: {err}"
                );
                self.write(&Entries::new()).await?;
            }
        }
        Ok(())
    }
}
