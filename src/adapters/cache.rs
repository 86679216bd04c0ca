//! Read-through artifact cache.
//!
//! Wraps another `ArtifactStore` and keeps each loaded artifact keyed by path.
//! Before a cached artifact is reused the file's length and modification time
//! are compared against the values seen at load time; any difference forces a
//! reload, so a replaced artifact is never served stale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use crate::ports::{ArtifactError, ArtifactStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self, ArtifactError> {
        let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

struct Entry<T> {
    stamp: FileStamp,
    artifact: Arc<T>,
}

type Slots<T> = Mutex<HashMap<PathBuf, Entry<T>>>;

/// Caching decorator over an artifact store.
pub struct CachingArtifactStore<S: ArtifactStore> {
    inner: S,
    scalers: Slots<S::Scaler>,
    models: Slots<S::Model>,
}

impl<S: ArtifactStore> CachingArtifactStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            scalers: Mutex::new(HashMap::new()),
            models: Mutex::new(HashMap::new()),
        }
    }
}

fn read_through<T>(
    slots: &Slots<T>,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, ArtifactError>,
) -> Result<Arc<T>, ArtifactError> {
    let stamp = FileStamp::of(path)?;
    // The map only holds fully loaded artifacts, so a poisoned lock is still usable.
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(entry) = slots.get(path) {
        if entry.stamp == stamp {
            tracing::debug!("Artifact cache hit for {:?}", path);
            return Ok(Arc::clone(&entry.artifact));
        }
        tracing::info!("Artifact {:?} changed on disk, reloading", path);
    }

    let artifact = Arc::new(load(path)?);
    slots.insert(
        path.to_path_buf(),
        Entry {
            stamp,
            artifact: Arc::clone(&artifact),
        },
    );
    Ok(artifact)
}

impl<S: ArtifactStore> ArtifactStore for CachingArtifactStore<S> {
    type Scaler = Arc<S::Scaler>;
    type Model = Arc<S::Model>;

    fn load_scaler(&self, path: &Path) -> Result<Self::Scaler, ArtifactError> {
        read_through(&self.scalers, path, |p| self.inner.load_scaler(p))
    }

    fn load_model(&self, path: &Path) -> Result<Self::Model, ArtifactError> {
        read_through(&self.models, path, |p| self.inner.load_model(p))
    }
}
