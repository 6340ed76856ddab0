use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::config::default_data_dir;
use crate::repository::traits::BlobStore;

const BLOB_EXTENSION: &str = "json";

/// Stores each blob as `<data_dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create data directory {}", dir.display()))?;

        Ok(FileBlobStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(anyhow!("Invalid blob key: '{}'", key));
        }
        Ok(self.dir.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

impl BlobStore for FileBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn set_blob(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key)?;
        let tmp_path = path.with_extension(format!("{}.tmp", BLOB_EXTENSION));

        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Could not create {}", tmp_path.display()))?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Could not replace {}", path.display()))?;

        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
