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

//! Splitting of raw path templates and `$NAME` environment expansion.

use std::env;

/// Separates the directory patterns of a raw template.
pub const LIST_DELIMITER: char = ';';

/// Characters that may appear in a `$NAME` variable reference.
fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Splits `template` on [`LIST_DELIMITER`] and expands each segment
/// independently, preserving order.
///
/// An empty template yields a single empty segment rather than an empty
/// list; index 0 of the result is always the highest-priority directory.
pub fn expand_list(template: &str) -> Vec<String> {
    template.split(LIST_DELIMITER).map(expand_segment).collect()
}

/// Expands every `$NAME` reference in a single template segment.
///
/// The variable name is the maximal run of ASCII alphanumerics, `_` and `-`
/// after the `$`. A set variable contributes its value, an unset (or
/// non-Unicode) one contributes nothing. A `$` followed by no name character
/// at all is kept as a literal `$`. Expansion never fails.
pub fn expand_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if !is_variable_char(next) {
                break;
            }
            name.push(next);
            chars.next();
        }

        if name.is_empty() {
            // Degenerate reference: "$" at end of segment or before a
            // non-name character stays literal.
            out.push('$');
        } else if let Ok(value) = env::var(&name) {
            out.push_str(&value);
        }
    }

    out
}
