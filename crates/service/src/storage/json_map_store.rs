use std::{
    collections::BTreeMap,
    ffi::OsString,
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// The file is the only copy of the data: every call reads the whole map
/// from disk, and every mutation writes the whole map back. A missing file
/// is an empty map. Output is pretty-printed with 2-space indentation and
/// keys in ascending order.
///
/// Mutations hold a per-store mutex for the full read-modify-write, and
/// saves go through a sibling temp file plus rename, so readers never see a
/// half-written file. Several processes sharing one file are not supported.
pub struct JsonMapStore<K, V> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + serde::Serialize + serde::de::DeserializeOwned,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Bind the store to a path, creating the parent directory if needed.
    /// The file itself is only written by the first mutation.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ServiceError::Io { path: parent.to_path_buf(), source })?;
        }

        Ok(Arc::new(Self { file_path, write_lock: Mutex::new(()), _entries: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load(&self) -> Result<BTreeMap<K, V>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(ServiceError::Io { path: self.file_path.clone(), source }),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| ServiceError::Decode { path: self.file_path.clone(), source })
    }

    async fn save(&self, map: &BTreeMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(ServiceError::Encode)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, &data)
            .await
            .map_err(|source| ServiceError::Io { path: tmp.clone(), source })?;
        if let Err(source) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Io { path: self.file_path.clone(), source });
        }
        debug!(path = %self.file_path.display(), entries = map.len(), bytes = data.len(), "store saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Result<Option<V>, ServiceError> {
        let map = self.load().await?;
        Ok(map.get(key).cloned())
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        self.update_map(|map| {
            map.insert(key, value);
            Ok(())
        })
        .await
    }

    /// Remove a key and persist; returns whether it existed.
    /// The file is rewritten even when the key was absent.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        self.update_map(|map| Ok(map.remove(key).is_some())).await
    }

    /// Apply a mutation to the stored map and persist it.
    /// An error from `f` aborts before anything is written.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        let out = f(&mut map)?;
        self.save(&map).await?;
        Ok(out)
    }
}
