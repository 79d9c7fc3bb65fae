use crate::persistence::{Storage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`Storage`] backed by one JSON file per key inside a directory.
///
/// This is the native stand-in for browser local storage. Writes land in a
/// temporary file that is renamed over the target, so a crash mid-write leaves
/// the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// ASCII letters, digits and `-` are kept; every other byte becomes `_` plus two
    /// hex digits. Distinct keys map to distinct files and no key can leave the
    /// directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push('_');
                name.push_str(&hex::encode([byte]));
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!(path = %path.display(), bytes = value.len(), "Read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_error(key, e))?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}
