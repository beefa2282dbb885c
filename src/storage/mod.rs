//! Set storage for Remembrall.
//!
//! The store is the only persistence boundary: it loads and saves the whole
//! collection at once. File-based and in-memory backends are provided.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileSetStore;
pub use memory::MemorySetStore;
pub use traits::SetStore;
