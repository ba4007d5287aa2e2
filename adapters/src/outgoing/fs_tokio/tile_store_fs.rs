use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use domain::{
    product::{ProductId, TileFormat},
    tile::{CacheStats, TileKey},
};
use lunar_tiles_application::{
    error::{AppError, AppResult},
    ports::outgoing::tile_store::TileStorePort,
};
use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Stores tiles as `<root>/<product>/tile_<zoom>_<row>_<col>.<ext>`.
///
/// Writes go to a uniquely named sibling temp file that is renamed into place, so
/// concurrent writers of the same tile never produce a torn file.
#[derive(Debug, Clone)]
pub struct FsTileStoreAdapter {
    root: PathBuf,
}

impl FsTileStoreAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn product_dir(&self, product: &ProductId) -> PathBuf {
        self.root.join(product.as_str())
    }

    fn tile_path(&self, key: &TileKey) -> PathBuf {
        self.product_dir(key.product()).join(key.file_name())
    }

    fn is_tile_file(path: &Path, format: TileFormat) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == format.extension())
    }

    async fn product_files(&self, product: &ProductId) -> AppResult<Vec<(PathBuf, u64)>> {
        let dir = self.product_dir(product);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error("list", &dir, &e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error("list", &dir, &e))?
        {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(storage_error("stat", &entry.path(), &e)),
            };
            if metadata.is_file() {
                files.push((entry.path(), metadata.len()));
            }
        }
        Ok(files)
    }
}

fn storage_error(action: &str, path: &Path, error: &io::Error) -> AppError {
    AppError::StorageError {
        message: format!("Failed to {action} {}: {error}", path.display()),
    }
}

#[async_trait::async_trait]
impl TileStorePort for FsTileStoreAdapter {
    async fn exists(&self, key: &TileKey) -> AppResult<bool> {
        let path = self.tile_path(key);
        fs::try_exists(&path)
            .await
            .map_err(|e| storage_error("check", &path, &e))
    }

    async fn read(&self, key: &TileKey) -> AppResult<Option<Vec<u8>>> {
        let path = self.tile_path(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, &e)),
        }
    }

    #[instrument(skip(self, data), fields(key = %key, bytes = data.len()))]
    async fn write(&self, key: &TileKey, data: &[u8]) -> AppResult<()> {
        let dir = self.product_dir(key.product());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create", &dir, &e))?;

        let path = self.tile_path(key);
        let temp_path = dir.join(format!("{}.tmp-{}", key.file_name(), Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&temp_path, data).await {
            fs::remove_file(&temp_path).await.ok();
            return Err(storage_error("write", &temp_path, &e));
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            fs::remove_file(&temp_path).await.ok();
            return Err(storage_error("rename into", &path, &e));
        }

        debug!("Wrote tile file {}", path.display());
        Ok(())
    }

    /// Only finished tiles are removed; temp files of in-flight writes are left for their rename.
    #[instrument(skip(self))]
    async fn clear_product(&self, product: &ProductId, format: TileFormat) -> AppResult<u64> {
        let mut removed = 0;
        for (path, _) in self.product_files(product).await? {
            if !Self::is_tile_file(&path, format) {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(error = %e, "Could not delete {}", path.display());
                    return Err(storage_error("delete", &path, &e));
                }
            }
        }

        self.prepare_product(product).await?;
        Ok(removed)
    }

    async fn stats(&self, product: &ProductId, format: TileFormat) -> AppResult<CacheStats> {
        let mut stats = CacheStats::default();
        for (path, size) in self.product_files(product).await? {
            if Self::is_tile_file(&path, format) {
                stats.record(size);
            }
        }
        Ok(stats)
    }

    async fn prepare_product(&self, product: &ProductId) -> AppResult<()> {
        let dir = self.product_dir(product);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create", &dir, &e))
    }
}
