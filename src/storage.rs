//! Durable per-axis angle storage.
//!
//! Each axis owns one store holding a single decimal integer, fully
//! overwritten on every change. No locking: one process per store.

use crate::error::{bounded, Result, StorageError};

/// Where an axis persists its angle.
pub trait AngleStore {
    /// Read the stored angle.
    ///
    /// # Errors
    ///
    /// `StorageError::Missing` if nothing was stored yet,
    /// `StorageError::Corrupt` if the content is not a decimal integer.
    fn load(&mut self) -> Result<i32>;

    /// Replace the stored angle.
    fn store(&mut self, angle: i32) -> Result<()>;
}

/// Parse stored text, tolerating surrounding whitespace.
pub fn parse_angle(text: &str) -> core::result::Result<i32, StorageError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StorageError::Corrupt(heapless::String::new()));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| StorageError::Corrupt(bounded(trimmed)))
}

/// In-memory store, for tests and targets without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryAngleStore {
    value: Option<i32>,
    writes: u32,
}

impl MemoryAngleStore {
    /// Empty store; loads report `Missing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `angle`.
    pub fn with_angle(angle: i32) -> Self {
        Self {
            value: Some(angle),
            writes: 0,
        }
    }

    /// Current content.
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// Number of `store` calls so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl AngleStore for MemoryAngleStore {
    fn load(&mut self) -> Result<i32> {
        self.value.ok_or_else(|| StorageError::Missing.into())
    }

    fn store(&mut self, angle: i32) -> Result<()> {
        self.value = Some(angle);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileAngleStore;

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{parse_angle, AngleStore};
    use crate::error::{bounded, Result, StorageError};

    /// Angle kept as plain decimal text in a file.
    #[derive(Debug, Clone)]
    pub struct FileAngleStore {
        path: PathBuf,
    }

    impl FileAngleStore {
        /// Store backed by `path`. The file is not touched until used.
        pub fn new<P: AsRef<Path>>(path: P) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Store for `file_name` inside `dir`.
        pub fn in_dir<P: AsRef<Path>>(dir: P, file_name: &str) -> Self {
            Self::new(dir.as_ref().join(file_name))
        }

        /// Backing file path.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl AngleStore for FileAngleStore {
        fn load(&mut self) -> Result<i32> {
            let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::Missing,
                _ => StorageError::Io(bounded(&e.to_string())),
            })?;
            Ok(parse_angle(&text)?)
        }

        fn store(&mut self, angle: i32) -> Result<()> {
            fs::write(&self.path, angle.to_string())
                .map_err(|e| StorageError::Io(bounded(&e.to_string())))?;
            Ok(())
        }
    }
}
