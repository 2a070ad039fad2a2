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

//! The closed set of resource categories the runtime can look up.

use std::fmt;

/// A kind of resource file, each with its own ordered search path.
///
/// The set is fixed at build time; callers cannot register new categories at
/// runtime. The discriminant doubles as the index into the registry's
/// per-category storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// ROM sets.
    Rom,
    /// Sample sets.
    Sample,
    /// Ini files.
    Ini,
    /// Saved configurations.
    Config,
    /// NVRAM contents.
    Nvram,
    /// Memory card contents.
    Memcard,
    /// Input device logs.
    InputLog,
    /// High scores.
    HighScore,
    /// Save states.
    State,
    /// Artwork (overlays etc.).
    Artwork,
    /// Screenshots.
    Snapshot,
    /// Hard drive image difference files.
    Diff,
    /// Controller definitions.
    Ctrlr,
    /// Wave files.
    Wave,
    /// Loose images; an alias that searches the [`Rom`](Self::Rom) path.
    Image,
}

impl ResourceCategory {
    /// Every category, in discriminant order.
    pub const ALL: [ResourceCategory; 15] = [
        ResourceCategory::Rom,
        ResourceCategory::Sample,
        ResourceCategory::Ini,
        ResourceCategory::Config,
        ResourceCategory::Nvram,
        ResourceCategory::Memcard,
        ResourceCategory::InputLog,
        ResourceCategory::HighScore,
        ResourceCategory::State,
        ResourceCategory::Artwork,
        ResourceCategory::Snapshot,
        ResourceCategory::Diff,
        ResourceCategory::Ctrlr,
        ResourceCategory::Wave,
        ResourceCategory::Image,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The category whose search path this one transparently forwards to,
    /// if it owns no directories of its own.
    pub fn alias_target(self) -> Option<ResourceCategory> {
        match self {
            ResourceCategory::Image => Some(ResourceCategory::Rom),
            _ => None,
        }
    }

    /// The raw template a fresh [`PathRegistry`](crate::PathRegistry) seeds
    /// this category with.
    pub fn default_template(self) -> &'static str {
        match self {
            ResourceCategory::Rom => "roms",
            ResourceCategory::Sample => "samples",
            ResourceCategory::Ini => "$HOME/.strata;.;ini",
            ResourceCategory::Config => "cfg",
            ResourceCategory::Nvram => "nvram",
            ResourceCategory::Memcard => "memcard",
            ResourceCategory::InputLog => "inp",
            ResourceCategory::HighScore => "hi",
            ResourceCategory::State => "sta",
            ResourceCategory::Artwork => "artwork",
            ResourceCategory::Snapshot => "snap",
            ResourceCategory::Diff => "diff",
            ResourceCategory::Ctrlr => "ctrlr",
            ResourceCategory::Wave => "wave",
            // Aliases never expand their own template.
            ResourceCategory::Image => "",
        }
    }

    /// A stable lowercase name, used in log output.
    pub fn name(self) -> &'static str {
        match self {
            ResourceCategory::Rom => "rom",
            ResourceCategory::Sample => "sample",
            ResourceCategory::Ini => "ini",
            ResourceCategory::Config => "config",
            ResourceCategory::Nvram => "nvram",
            ResourceCategory::Memcard => "memcard",
            ResourceCategory::InputLog => "inputlog",
            ResourceCategory::HighScore => "highscore",
            ResourceCategory::State => "state",
            ResourceCategory::Artwork => "artwork",
            ResourceCategory::Snapshot => "snapshot",
            ResourceCategory::Diff => "diff",
            ResourceCategory::Ctrlr => "ctrlr",
            ResourceCategory::Wave => "wave",
            ResourceCategory::Image => "image",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
