// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed-capacity pool of open file slots.

use std::fs::OpenOptions;
use std::io::ErrorKind;

use crate::dirs::create_ancestors;
use crate::error::FileError;
use crate::file::BufferedFile;

/// Number of slots in a [`FilePool`].
pub const MAX_OPEN_FILES: usize = 16;

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only; the file must exist.
    Read,
    /// Write-only; the file is created if missing and truncated otherwise.
    Write,
    /// Read-write on an existing file.
    ReadWrite,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write => {
                options.write(true).create(true).truncate(true);
            }
            OpenMode::ReadWrite => {
                options.read(true).write(true);
            }
        }
        options
    }

    /// Only the creating mode earns the one-shot missing-directory retry.
    fn creates(self) -> bool {
        matches!(self, OpenMode::Write)
    }
}

/// A handle to an open slot.
///
/// Carries the slot's generation so a handle held across a close and a
/// later reopen of the same slot goes stale instead of aliasing the new
/// file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    index: usize,
    generation: u64,
}

struct Slot {
    generation: u64,
    file: Option<BufferedFile>,
}

/// A fixed set of [`MAX_OPEN_FILES`] open-file slots.
///
/// Slots move from free to open on a successful OS open and back to free on
/// [`close`](Self::close). Opening while every slot is taken fails with
/// [`FileError::TooManyOpenHandles`]. No internal locking; callers serialize
/// access externally.
pub struct FilePool {
    slots: [Slot; MAX_OPEN_FILES],
}

impl FilePool {
    /// Creates a pool with every slot free.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot {
                generation: 0,
                file: None,
            }),
        }
    }

    /// Opens `path` in `mode` and binds it to a free slot.
    ///
    /// A write-mode open that fails because a path component is missing
    /// triggers one round of ancestor-directory creation followed by one
    /// retry; any other failure (or a failing retry) is terminal.
    pub fn open_path(&mut self, path: &str, mode: OpenMode) -> Result<FileId, FileError> {
        if path.is_empty() {
            return Err(FileError::PathNotFound {
                path: path.to_string(),
            });
        }

        let index = self
            .slots
            .iter()
            .position(|slot| slot.file.is_none())
            .ok_or(FileError::TooManyOpenHandles {
                capacity: MAX_OPEN_FILES,
            })?;

        log::debug!("opening '{path}' ({mode:?})");
        let file = match mode.options().open(path) {
            Ok(file) => file,
            Err(err) if mode.creates() && err.kind() == ErrorKind::NotFound => {
                create_ancestors(path, true);
                mode.options().open(path).map_err(|source| {
                    log::warn!("open of '{path}' failed after directory creation: {source}");
                    FileError::OpenFailed {
                        path: path.to_string(),
                        source,
                    }
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(FileError::PathNotFound {
                    path: path.to_string(),
                });
            }
            Err(source) => {
                log::warn!("open of '{path}' failed: {source}");
                return Err(FileError::OpenFailed {
                    path: path.to_string(),
                    source,
                });
            }
        };

        let buffered =
            BufferedFile::new(file, path.to_string()).map_err(|source| FileError::OpenFailed {
                path: path.to_string(),
                source,
            })?;

        let slot = &mut self.slots[index];
        slot.generation += 1;
        slot.file = Some(buffered);
        Ok(FileId {
            index,
            generation: slot.generation,
        })
    }

    /// The open file bound to `id`, or `None` for a closed or stale handle.
    pub fn get_mut(&mut self, id: FileId) -> Option<&mut BufferedFile> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.file.as_mut()
    }

    /// Releases `id`'s descriptor and returns its slot to the free set.
    /// Closing an already-closed or stale handle is a no-op.
    pub fn close(&mut self, id: FileId) {
        if let Some(slot) = self.slots.get_mut(id.index) {
            if slot.generation == id.generation {
                slot.file = None;
            }
        }
    }

    /// Number of slots currently open.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.file.is_some()).count()
    }
}

impl Default for FilePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_path_is_not_found() {
        let mut pool = FilePool::new();
        assert!(matches!(
            pool.open_path("", OpenMode::Read),
            Err(FileError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_read_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin").to_string_lossy().into_owned();

        let mut pool = FilePool::new();
        assert!(matches!(
            pool.open_path(&path, OpenMode::Read),
            Err(FileError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_read_write_does_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin").to_string_lossy().into_owned();

        let mut pool = FilePool::new();
        assert!(pool.open_path(&path, OpenMode::ReadWrite).is_err());
        assert!(!dir.path().join("absent.bin").exists());
    }

    #[test]
    fn test_write_creates_missing_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("a/b/c/file.dat")
            .to_string_lossy()
            .into_owned();

        let mut pool = FilePool::new();
        let id = pool.open_path(&path, OpenMode::Write).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
        assert!(dir.path().join("a/b/c/file.dat").is_file());
        pool.close(id);
    }

    #[test]
    fn test_write_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path_buf = dir.path().join("data.bin");
        fs::write(&path_buf, [1u8; 64]).unwrap();
        let path = path_buf.to_string_lossy().into_owned();

        let mut pool = FilePool::new();
        let id = pool.open_path(&path, OpenMode::Write).unwrap();
        assert_eq!(pool.get_mut(id).unwrap().size(), 0);
        pool.close(id);
    }

    #[test]
    fn test_pool_exhaustion_and_recovery() {
        let dir = tempfile::tempdir().unwrap();
        let mut pool = FilePool::new();

        let ids: Vec<FileId> = (0..MAX_OPEN_FILES)
            .map(|i| {
                let path = dir
                    .path()
                    .join(format!("f{i}.bin"))
                    .to_string_lossy()
                    .into_owned();
                pool.open_path(&path, OpenMode::Write).unwrap()
            })
            .collect();
        assert_eq!(pool.open_count(), MAX_OPEN_FILES);

        let extra = dir.path().join("extra.bin").to_string_lossy().into_owned();
        assert!(matches!(
            pool.open_path(&extra, OpenMode::Write),
            Err(FileError::TooManyOpenHandles { .. })
        ));

        pool.close(ids[3]);
        assert!(pool.open_path(&extra, OpenMode::Write).is_ok());
    }

    #[test]
    fn test_double_close_is_noop_and_handles_go_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.bin").to_string_lossy().into_owned();

        let mut pool = FilePool::new();
        let id = pool.open_path(&path, OpenMode::Write).unwrap();
        pool.close(id);
        pool.close(id);
        assert!(pool.get_mut(id).is_none());

        // Reusing the slot must not revive the old handle.
        let second = pool.open_path(&path, OpenMode::Write).unwrap();
        assert!(pool.get_mut(id).is_none());
        assert!(pool.get_mut(second).is_some());
        pool.close(id);
        assert!(pool.get_mut(second).is_some());
    }
}
