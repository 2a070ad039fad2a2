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

//! Per-category search-path storage with lazy, invalidate-on-change
//! expansion.

use crate::category::ResourceCategory;
use crate::expand::{expand_list, LIST_DELIMITER};

/// One category's search-path state.
///
/// `expanded` is `None` while stale; it is recomputed from `raw` (plus the
/// ROM prefix, for the ROM category) on the next access and must never be
/// read while stale.
struct PathSet {
    raw: String,
    expanded: Option<Vec<String>>,
}

/// Holds every category's raw template and its lazily expanded directory
/// list.
///
/// A fresh registry seeds each category with
/// [`ResourceCategory::default_template`]. Index 0 of an expanded list is
/// the highest-priority search directory. The registry performs no internal
/// locking; a concurrent caller must serialize access externally.
pub struct PathRegistry {
    sets: Vec<PathSet>,
    rom_prefix: Option<String>,
}

impl PathRegistry {
    /// Creates a registry seeded with the default template per category.
    pub fn new() -> Self {
        let sets = ResourceCategory::ALL
            .iter()
            .map(|category| PathSet {
                raw: category.default_template().to_string(),
                expanded: None,
            })
            .collect();
        Self {
            sets,
            rom_prefix: None,
        }
    }

    /// Replaces `category`'s raw template and discards its expanded list.
    ///
    /// The next [`resolve`](Self::resolve) or
    /// [`path_count`](Self::path_count) recomputes the expansion.
    pub fn set_template(&mut self, category: ResourceCategory, template: impl Into<String>) {
        let set = &mut self.sets[category.index()];
        set.raw = template.into();
        set.expanded = None;
        log::debug!("search path for '{category}' replaced");
    }

    /// Sets or clears the extra directory-list fragment searched ahead of
    /// the ROM template.
    ///
    /// The fragment participates in expansion as if it were spliced in front
    /// of the raw template, but the raw template itself is never mutated, so
    /// the prefix appears exactly once no matter how often paths are
    /// resolved.
    pub fn set_rom_prefix(&mut self, prefix: Option<String>) {
        if self.rom_prefix != prefix {
            self.rom_prefix = prefix;
            self.sets[ResourceCategory::Rom.index()].expanded = None;
        }
    }

    /// Returns the directory at `index` for `category`, along with the total
    /// number of directories on that category's search path.
    ///
    /// Out-of-range indexes yield `None` alongside the true count; that is
    /// not an error. Alias categories resolve against their target's list.
    pub fn resolve(&mut self, category: ResourceCategory, index: usize) -> (Option<&str>, usize) {
        let list = self.expanded_list(Self::target(category));
        (list.get(index).map(String::as_str), list.len())
    }

    /// Number of directories on `category`'s search path.
    pub fn path_count(&mut self, category: ResourceCategory) -> usize {
        self.expanded_list(Self::target(category)).len()
    }

    fn target(category: ResourceCategory) -> ResourceCategory {
        category.alias_target().unwrap_or(category)
    }

    fn expanded_list(&mut self, category: ResourceCategory) -> &[String] {
        let idx = category.index();

        if self.sets[idx].expanded.is_none() {
            let raw = self.sets[idx].raw.as_str();
            let effective = match (&self.rom_prefix, category) {
                (Some(prefix), ResourceCategory::Rom) => {
                    format!("{prefix}{LIST_DELIMITER}{raw}")
                }
                _ => raw.to_string(),
            };
            let expanded = expand_list(&effective);
            log::debug!(
                "expanded search path for '{category}': {} director{}",
                expanded.len(),
                if expanded.len() == 1 { "y" } else { "ies" }
            );
            self.sets[idx].expanded = Some(expanded);
        }

        self.sets[idx].expanded.as_deref().unwrap_or(&[])
    }
}

impl Default for PathRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_templates_seeded() {
        let mut registry = PathRegistry::new();
        let (dir, count) = registry.resolve(ResourceCategory::Config, 0);
        assert_eq!(dir, Some("cfg"));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_out_of_range_reports_count() {
        let mut registry = PathRegistry::new();
        registry.set_template(ResourceCategory::Sample, "a;b");
        let (dir, count) = registry.resolve(ResourceCategory::Sample, 5);
        assert_eq!(dir, None);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_set_template_invalidates() {
        let mut registry = PathRegistry::new();
        assert_eq!(registry.resolve(ResourceCategory::State, 0).0, Some("sta"));
        registry.set_template(ResourceCategory::State, "states;backup");
        assert_eq!(
            registry.resolve(ResourceCategory::State, 0).0,
            Some("states")
        );
        assert_eq!(registry.path_count(ResourceCategory::State), 2);
    }

    #[test]
    fn test_image_forwards_to_rom() {
        let mut registry = PathRegistry::new();
        registry.set_template(ResourceCategory::Rom, "carts;extra");
        assert_eq!(registry.resolve(ResourceCategory::Image, 1).0, Some("extra"));
        assert_eq!(registry.path_count(ResourceCategory::Image), 2);
    }

    #[test]
    fn test_rom_prefix_applied_exactly_once() {
        let mut registry = PathRegistry::new();
        registry.set_template(ResourceCategory::Rom, "roms");
        registry.set_rom_prefix(Some("/mnt/cart".to_string()));

        for _ in 0..3 {
            let (dir, count) = registry.resolve(ResourceCategory::Rom, 0);
            assert_eq!(dir, Some("/mnt/cart"));
            assert_eq!(count, 2);
        }
        assert_eq!(registry.resolve(ResourceCategory::Rom, 1).0, Some("roms"));

        registry.set_rom_prefix(None);
        assert_eq!(registry.path_count(ResourceCategory::Rom), 1);
    }

    #[test]
    fn test_environment_scenario() {
        env::set_var("STRATA_REG_HOME", "/home/x");
        let mut registry = PathRegistry::new();
        registry.set_template(ResourceCategory::Config, "$STRATA_REG_HOME/.app;./data");

        assert_eq!(
            registry.resolve(ResourceCategory::Config, 0).0,
            Some("/home/x/.app")
        );
        assert_eq!(registry.resolve(ResourceCategory::Config, 1).0, Some("./data"));
        assert_eq!(registry.path_count(ResourceCategory::Config), 2);
    }
}
