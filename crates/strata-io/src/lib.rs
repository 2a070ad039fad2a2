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

//! Pooled, buffered file I/O over categorized search paths.
//!
//! Built on `strata-paths`: a caller supplies a
//! [`ResourceCategory`](strata_paths::ResourceCategory), a search-path
//! index, a filename and an [`OpenMode`]; the [`ResourceIo`] context
//! resolves the directory, composes the full path, binds the opened file to
//! one of [`MAX_OPEN_FILES`] pool slots and hands back a [`FileId`]. All
//! further reads, writes and seeks go through the slot's [`BufferedFile`],
//! which keeps a small read-ahead cache and defers OS seeks until they are
//! needed.
//!
//! Everything here is synchronous and unlocked; the caller owns the context
//! and serializes access to it.

pub mod context;
pub mod error;
pub mod file;
pub mod pool;

mod dirs;

pub use context::{PathProbe, ResourceIo};
pub use error::FileError;
pub use file::{BufferedFile, CACHE_SIZE};
pub use pool::{FileId, FilePool, OpenMode, MAX_OPEN_FILES};
