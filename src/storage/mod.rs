pub mod error;
pub mod record;
pub mod file_storage;

pub use error::StorageError;
pub use record::Record;
pub use file_storage::FileStorage;
