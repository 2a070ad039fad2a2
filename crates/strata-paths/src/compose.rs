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

//! Joining a resolved directory with a filename.

/// Returns `true` for the characters treated as path separators when
/// composing paths: `/`, `\` and the drive-relative `:`.
pub fn is_path_separator(c: char) -> bool {
    matches!(c, '/' | '\\' | ':')
}

/// Joins `directory` and `filename` into a single normalized path.
///
/// An empty directory yields an empty path. Otherwise a single `/` is
/// inserted unless the directory already ends with a separator, and every
/// backslash in either input is normalized to a forward slash. Pure string
/// work; no filesystem access.
pub fn compose(directory: &str, filename: &str) -> String {
    if directory.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(directory.len() + filename.len() + 1);
    push_normalized(&mut out, directory);
    if !directory.ends_with(is_path_separator) {
        out.push('/');
    }
    push_normalized(&mut out, filename);
    out
}

fn push_normalized(out: &mut String, s: &str) {
    for c in s.chars() {
        out.push(if c == '\\' { '/' } else { c });
    }
}
