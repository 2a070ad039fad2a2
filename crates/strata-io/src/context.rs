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

//! The caller-owned context joining search paths with the file pool.

use std::fs;

use strata_paths::{compose, PathRegistry, ResourceCategory};

use crate::error::FileError;
use crate::file::BufferedFile;
use crate::pool::{FileId, FilePool, OpenMode};

/// What a probed path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathProbe {
    /// Nothing exists at the composed path.
    NotFound,
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Directory,
}

/// Owns the whole resource-I/O state: one [`PathRegistry`] and one
/// [`FilePool`].
///
/// There are no hidden process-wide statics; callers create a `ResourceIo`,
/// keep it wherever they keep their other services, and pass it by reference
/// into every operation. The context performs no internal locking — a
/// single logical thread of control must drive it at any moment, and
/// concurrent callers serialize access externally.
pub struct ResourceIo {
    registry: PathRegistry,
    pool: FilePool,
}

impl ResourceIo {
    /// Creates a context with default search templates and an empty pool.
    pub fn new() -> Self {
        Self {
            registry: PathRegistry::new(),
            pool: FilePool::new(),
        }
    }

    /// Replaces `category`'s raw search-path template.
    pub fn set_template(&mut self, category: ResourceCategory, template: impl Into<String>) {
        self.registry.set_template(category, template);
    }

    /// Sets or clears the extra directory fragment searched ahead of the
    /// ROM template.
    pub fn set_rom_prefix(&mut self, prefix: Option<String>) {
        self.registry.set_rom_prefix(prefix);
    }

    /// The directory at `index` on `category`'s search path, plus the total
    /// directory count.
    pub fn resolve(&mut self, category: ResourceCategory, index: usize) -> (Option<&str>, usize) {
        self.registry.resolve(category, index)
    }

    /// Number of directories on `category`'s search path.
    pub fn path_count(&mut self, category: ResourceCategory) -> usize {
        self.registry.path_count(category)
    }

    /// Composes the full path for `filename` under the `index`-th directory
    /// of `category`. Empty when `index` is out of range.
    pub fn full_path(&mut self, category: ResourceCategory, index: usize, filename: &str) -> String {
        let (directory, _) = self.registry.resolve(category, index);
        compose(directory.unwrap_or(""), filename)
    }

    /// Opens `filename` under the `index`-th search directory of `category`.
    pub fn open(
        &mut self,
        category: ResourceCategory,
        index: usize,
        filename: &str,
        mode: OpenMode,
    ) -> Result<FileId, FileError> {
        let path = self.full_path(category, index, filename);
        self.pool.open_path(&path, mode)
    }

    /// The open file behind `id`, or `None` for a closed or stale handle.
    pub fn file_mut(&mut self, id: FileId) -> Option<&mut BufferedFile> {
        self.pool.get_mut(id)
    }

    /// Closes `id`; closing an already-closed handle is a no-op.
    pub fn close(&mut self, id: FileId) {
        self.pool.close(id);
    }

    /// Number of open pool slots.
    pub fn open_count(&self) -> usize {
        self.pool.open_count()
    }

    /// Checks what exists at `filename` under the `index`-th search
    /// directory of `category`, without opening it.
    pub fn probe(&mut self, category: ResourceCategory, index: usize, filename: &str) -> PathProbe {
        let path = self.full_path(category, index, filename);
        if path.is_empty() {
            return PathProbe::NotFound;
        }
        match fs::metadata(&path) {
            Err(_) => PathProbe::NotFound,
            Ok(meta) if meta.is_dir() => PathProbe::Directory,
            Ok(_) => PathProbe::File,
        }
    }
}

impl Default for ResourceIo {
    fn default() -> Self {
        Self::new()
    }
}
