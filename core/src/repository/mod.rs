pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use traits::BlobStore;
