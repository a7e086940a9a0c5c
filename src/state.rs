use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::StateError;

/// Storage for the single persisted value telling which comic was last shown as new
pub trait MarkerStore {
    /// Returns the stored comic number, or None if nothing has been stored yet
    fn get(&self) -> Result<Option<u32>, StateError>;

    /// Stores a comic number, replacing any previous value
    ///
    /// # Arguments
    ///
    /// * 'value' - the comic number
    fn set(&mut self, value: u32) -> Result<(), StateError>;
}

/// Keeps the marker as a plain decimal number in a small text file
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    /// Returns a new FileMarkerStore
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the marker file, it doesn't need to exist
    pub fn new<P: AsRef<Path>>(path: P) -> FileMarkerStore {
        FileMarkerStore { path: path.as_ref().to_path_buf() }
    }
}

impl MarkerStore for FileMarkerStore {
    fn get(&self) -> Result<Option<u32>, StateError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let value = content.trim()
            .parse::<u32>()
            .map_err(|_| StateError::Corrupt(content.trim().to_string()))?;

        Ok(Some(value))
    }

    fn set(&mut self, value: u32) -> Result<(), StateError> {
        fs::write(&self.path, value.to_string())?;
        Ok(())
    }
}

/// In-process marker, forgotten when the process exits
#[derive(Default)]
pub struct MemoryMarkerStore {
    value: Option<u32>,
}

#[cfg(test)]
impl MemoryMarkerStore {
    pub fn with_value(value: u32) -> MemoryMarkerStore {
        MemoryMarkerStore { value: Some(value) }
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn get(&self) -> Result<Option<u32>, StateError> {
        Ok(self.value)
    }

    fn set(&mut self, value: u32) -> Result<(), StateError> {
        self.value = Some(value);
        Ok(())
    }
}
