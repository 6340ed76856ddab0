use anyhow::Result;

/// Key-value blob storage the symptom store persists through.
pub trait BlobStore {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set_blob(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get_blob(key)
    }

    fn set_blob(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).set_blob(key, bytes)
    }
}
