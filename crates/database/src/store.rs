use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const RECORD_FILE_NAME: &str = "progress.json";
pub const IMAGE_FILE_NAME: &str = "profile_picture";

/// Whole-record persistence for the single stored record.
pub trait RecordStore {
    /// Reads the record back. A missing file yields `T::default()`.
    fn load<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default;

    /// Replaces the stored record with `record`. There is no merge with what
    /// was there before and no atomic rename: a crash mid-write can leave a
    /// truncated file behind.
    fn save<T>(&self, record: &T) -> Result<(), StoreError>
    where
        T: Serialize;
}

/// Storage for the single profile picture.
///
/// Bytes are kept as uploaded; format and size are never checked here.
pub trait ImageStore {
    fn has_image(&self) -> bool;

    fn save_image(&self, bytes: &[u8]) -> Result<(), StoreError>;

    /// Fixed location of the picture, or `None` when nothing was uploaded yet.
    fn load_path(&self) -> Option<PathBuf>;

    fn load_image(&self) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Everything the HTTP layer needs from storage, shareable as router state.
pub trait BiographyStore: RecordStore + ImageStore + Clone + Send + Sync + 'static {}

impl<S> BiographyStore for S where S: RecordStore + ImageStore + Clone + Send + Sync + 'static {}

/// Record and picture kept as two plain files in one data directory.
///
/// Writers are not serialized: two concurrent saves race and the last one wins.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: Arc<PathBuf>,
}

impl FileStore {
    /// Opens the store rooted at `data_dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();

        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir).map_err(|source| StoreError::DirectoryCreate {
                path: data_dir.clone(),
                source,
            })?;
            info!(path = %data_dir.display(), "created data directory");
        }

        Ok(Self {
            data_dir: Arc::new(data_dir),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(RECORD_FILE_NAME)
    }

    fn picture_path(&self) -> PathBuf {
        self.data_dir.join(IMAGE_FILE_NAME)
    }
}

impl RecordStore for FileStore {
    fn load<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.record_path();

        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no record file yet, starting empty");
                return Ok(T::default());
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Malformed { path, source })
    }

    fn save<T>(&self, record: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.record_path();
        let json = serde_json::to_vec(record).map_err(StoreError::Serialize)?;

        std::fs::write(&path, json).map_err(|source| StoreError::Write { path: path.clone(), source })?;
        debug!(path = %path.display(), "record written");
        Ok(())
    }
}

impl ImageStore for FileStore {
    fn has_image(&self) -> bool {
        self.picture_path().exists()
    }

    fn save_image(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.picture_path();

        std::fs::write(&path, bytes).map_err(|source| StoreError::Write { path: path.clone(), source })?;
        debug!(path = %path.display(), size = bytes.len(), "profile picture written");
        Ok(())
    }

    fn load_path(&self) -> Option<PathBuf> {
        let path = self.picture_path();
        path.exists().then_some(path)
    }

    fn load_image(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.picture_path();

        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Note {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pages: Option<u32>,
    }

    #[test]
    fn test_open_creates_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let data_dir = temp_dir.path().join("nested").join("biography_data");

        let store = FileStore::open(&data_dir)?;

        assert!(data_dir.is_dir());
        assert_eq!(store.data_dir(), data_dir.as_path());
        assert_eq!(store.record_path(), data_dir.join("progress.json"));
        Ok(())
    }

    #[test]
    fn test_load_without_file_is_default() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;

        let note: Note = store.load()?;

        assert_eq!(note, Note::default());
        assert!(!store.record_path().exists());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;
        let note = Note {
            title: Some("Ada".to_string()),
            pages: Some(30),
        };

        store.save(&note)?;
        let loaded: Note = store.load()?;

        assert_eq!(loaded, note);
        Ok(())
    }

    #[test]
    fn test_save_overwrites_whole_record() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;

        store.save(&Note {
            title: Some("first".to_string()),
            pages: Some(1),
        })?;
        store.save(&Note {
            title: Some("second".to_string()),
            pages: None,
        })?;

        let loaded: Note = store.load()?;
        assert_eq!(loaded.title.as_deref(), Some("second"));
        assert_eq!(loaded.pages, None);

        let raw = std::fs::read_to_string(store.record_path())?;
        assert_eq!(raw, r#"{"title":"second"}"#);
        Ok(())
    }

    #[test]
    fn test_load_malformed_json_fails() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;
        std::fs::write(store.record_path(), b"{\"title\": ")?;

        let result = store.load::<Note>();

        match result {
            Err(err) => assert!(err.is_malformed()),
            Ok(_) => return Err("expected a malformed record error".into()),
        }
        Ok(())
    }

    #[test]
    fn test_image_absent_by_default() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;

        assert!(!store.has_image());
        assert!(store.load_path().is_none());
        assert!(store.load_image()?.is_none());
        Ok(())
    }

    #[test]
    fn test_save_image_then_read() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;
        let picture = [0x89, b'P', b'N', b'G', 1, 2, 3];

        store.save_image(&picture)?;

        assert!(store.has_image());
        let path = store.load_path().ok_or("image path missing")?;
        assert_eq!(path, temp_dir.path().join("profile_picture"));
        assert_eq!(std::fs::read(&path)?, picture);
        assert_eq!(store.load_image()?, Some(picture.to_vec()));
        Ok(())
    }

    #[test]
    fn test_second_image_replaces_first() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;

        store.save_image(&[1, 2, 3, 4, 5, 6, 7, 8])?;
        store.save_image(&[9, 9])?;

        assert_eq!(store.load_image()?, Some(vec![9, 9]));
        Ok(())
    }

    #[test]
    fn test_clones_share_directory() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let store = FileStore::open(temp_dir.path())?;
        let other = store.clone();

        other.save(&Note {
            title: Some("shared".to_string()),
            pages: None,
        })?;

        let loaded: Note = store.load()?;
        assert_eq!(loaded.title.as_deref(), Some("shared"));
        Ok(())
    }
}
