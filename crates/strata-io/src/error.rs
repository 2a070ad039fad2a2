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

//! Error types for the pooled file layer.
//!
//! Short transfers are deliberately *not* represented here: a read or write
//! that moves fewer bytes than requested reports the actual count to the
//! caller, who decides whether that is end-of-file, a quota, or a problem.

use thiserror::Error;

/// A terminal failure from an open, close-independent file operation.
#[derive(Debug, Error)]
pub enum FileError {
    /// The target did not exist on the resolved search path (or the path
    /// resolved to nothing at all).
    #[error("path not found: '{path}'")]
    PathNotFound { path: String },

    /// Every slot of the fixed-capacity pool is already in use.
    #[error("too many open handles ({capacity} slots in use)")]
    TooManyOpenHandles { capacity: usize },

    /// The OS refused the open, including the case where the one-shot
    /// directory-creation retry also failed.
    #[error("failed to open '{path}'")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Repositioning the OS cursor before a write failed; nothing was
    /// written.
    #[error("failed to reposition '{path}' to offset {offset}")]
    RepositionFailed {
        path: String,
        offset: u64,
        #[source]
        source: std::io::Error,
    },
}
