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

//! Lazy creation of missing ancestor directories.

use std::fs;
use std::io;

use strata_paths::is_path_separator;

/// Ensures the directory chain leading to `path` exists, creating only the
/// missing segments, parents before children.
///
/// With `has_filename` set, the final component of `path` is treated as a
/// filename and never created. Called only as the one-shot retry after a
/// write-mode open fails with a missing path component, so creation failures
/// are logged and otherwise left for the retried open to report.
pub(crate) fn create_ancestors(path: &str, has_filename: bool) {
    if let Some(pos) = path.rfind(is_path_separator) {
        // Recurse on the parent unless the separator is doubled (a root
        // like "//" or the slash right after "C:").
        if pos > 0 && !path[..pos].ends_with(is_path_separator) {
            create_ancestors(&path[..pos], false);
        }
    }

    if has_filename {
        return;
    }

    if fs::metadata(path).is_ok() {
        return;
    }

    log::debug!("creating directory '{path}'");
    if let Err(err) = make_dir(path) {
        log::warn!("could not create directory '{path}': {err}");
    }
}

fn make_dir(path: &str) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}
