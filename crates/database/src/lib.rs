pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{BiographyStore, FileStore, ImageStore, RecordStore, IMAGE_FILE_NAME, RECORD_FILE_NAME};
