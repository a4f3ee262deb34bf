//! Flat JSON document store
//!
//! The whole dataset is one [`Document`], read fully for every query and
//! written back fully for every change.
//!
//! - Writes go to a sibling `*.tmp` file which is then renamed over the target.
//! - Every write carries the version it was based on. If the stored version
//!   has moved on (another process wrote the file), the write is refused with
//!   [`StoreError::Conflict`].
//! - Inside this process, [`JsonStore::mutate`] holds an async mutex across
//!   its read-modify-write so concurrent requests never interleave.

pub mod document;
pub mod error;
pub mod repository;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use shared::error::AppError;

pub use document::Document;
pub use error::StoreError;

enum Backend {
    File(PathBuf),
    Memory(RwLock<Document>),
}

struct Inner {
    backend: Backend,
    write_lock: Mutex<()>,
}

/// Handle to the document store; cheap to clone
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner.backend {
            Backend::File(path) => f.debug_tuple("JsonStore::File").field(path).finish(),
            Backend::Memory(_) => f.write_str("JsonStore::Memory"),
        }
    }
}

impl JsonStore {
    /// File-backed store. A missing file reads as an empty document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(Backend::File(path.into()))
    }

    pub fn memory() -> Self {
        Self::with_backend(Backend::Memory(RwLock::new(Document::default())))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.inner.backend {
            Backend::File(path) => Some(path),
            Backend::Memory(_) => None,
        }
    }

    /// Read the current document
    pub async fn load(&self) -> Result<Document, StoreError> {
        match &self.inner.backend {
            Backend::File(path) => read_file(path).await,
            Backend::Memory(doc) => Ok(doc.read().await.clone()),
        }
    }

    /// Write `doc` if the stored version still equals `expected_version`.
    ///
    /// Returns the new version.
    pub async fn save(&self, doc: Document, expected_version: u64) -> Result<u64, StoreError> {
        let _guard = self.inner.write_lock.lock().await;
        self.save_locked(doc, expected_version).await
    }

    async fn save_locked(&self, mut doc: Document, expected_version: u64) -> Result<u64, StoreError> {
        let next = expected_version + 1;
        match &self.inner.backend {
            Backend::File(path) => {
                let current = read_file(path).await?.version;
                if current != expected_version {
                    return Err(StoreError::Conflict {
                        expected: expected_version,
                        found: current,
                    });
                }
                doc.version = next;
                write_file(path, &doc).await?;
            }
            Backend::Memory(slot) => {
                let mut stored = slot.write().await;
                if stored.version != expected_version {
                    return Err(StoreError::Conflict {
                        expected: expected_version,
                        found: stored.version,
                    });
                }
                doc.version = next;
                *stored = doc;
            }
        }
        Ok(next)
    }

    /// Read-modify-write under the store lock.
    ///
    /// `f` edits the document in place; when it fails nothing is written.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Document) -> Result<T, AppError>,
    {
        let _guard = self.inner.write_lock.lock().await;
        let mut doc = self.load().await?;
        let base_version = doc.version;
        let out = f(&mut doc)?;
        let version = self.save_locked(doc, base_version).await?;
        tracing::debug!(version, "Document saved");
        Ok(out)
    }
}

async fn read_file(path: &Path) -> Result<Document, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::default()),
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Corrupted),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
        Err(e) => Err(e.into()),
    }
}

async fn write_file(path: &Path, doc: &Document) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(doc).map_err(StoreError::Serialize)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::{Category, TableStatus};
    use tempfile::TempDir;

    fn category(id: &str) -> Category {
        Category {
            id: id.into(),
            name: id.into(),
            display_order: 1,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("db.json"));
        let doc = store.load().await.unwrap();
        assert_eq!(doc, Document::default());
    }

    #[tokio::test]
    async fn test_mutate_persists_and_bumps_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("db.json");
        let store = JsonStore::open(&path);

        store
            .mutate(|doc| {
                doc.categories.push(category("cat-1"));
                Ok(())
            })
            .await
            .unwrap();

        let reopened = JsonStore::open(&path);
        let doc = reopened.load().await.unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.categories.len(), 1);
        assert!(!dir.path().join("nested").join("db.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let store = JsonStore::memory();
        let result: Result<(), AppError> = store
            .mutate(|doc| {
                doc.categories.push(category("cat-1"));
                Err(AppError::validation("nope"))
            })
            .await;
        assert!(result.is_err());
        let doc = store.load().await.unwrap();
        assert_eq!(doc.version, 0);
        assert!(doc.categories.is_empty());
    }

    #[tokio::test]
    async fn test_stale_write_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let a = JsonStore::open(&path);
        let b = JsonStore::open(&path);

        let doc_a = a.load().await.unwrap();
        let doc_b = b.load().await.unwrap();

        assert_eq!(a.save(doc_a, 0).await.unwrap(), 1);
        let err = b.save(doc_b, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { expected: 0, found: 1 }));

        let app_err: AppError = err.into();
        assert_eq!(app_err.code, ErrorCode::StoreConflict);
    }

    #[tokio::test]
    async fn test_memory_stale_write_is_refused() {
        let store = JsonStore::memory();
        let doc = store.load().await.unwrap();
        store.save(doc.clone(), 0).await.unwrap();
        assert!(matches!(
            store.save(doc, 0).await,
            Err(StoreError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_mutations_serialize() {
        let store = JsonStore::memory();
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .mutate(move |doc| {
                        doc.categories.push(category(&format!("cat-{i}")));
                        Ok(())
                    })
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        let doc = store.load().await.unwrap();
        assert_eq!(doc.version, 20);
        assert_eq!(doc.categories.len(), 20);
    }

    #[tokio::test]
    async fn test_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonStore::open(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }

    #[tokio::test]
    async fn test_reads_legacy_document_without_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(
            &path,
            r#"{"tables":[{"id":"table-1","number":1,"capacity":4,"status":"occupied","qrCode":"QR_TABLE_1"}]}"#,
        )
        .unwrap();
        let doc = JsonStore::open(&path).load().await.unwrap();
        assert_eq!(doc.version, 0);
        assert_eq!(doc.tables[0].status, TableStatus::Occupied);
    }
}
