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

//! Categorized search-path resolution for resource files.
//!
//! Every kind of resource the runtime needs to locate (images, configuration,
//! save state, …) belongs to one [`ResourceCategory`]. Each category owns a
//! *raw template*: a `;`-separated list of directory patterns that may embed
//! `$NAME` environment-variable references. The [`PathRegistry`] turns
//! templates into ordered, fully expanded directory lists on demand and keeps
//! them until the template changes.
//!
//! This crate is the pure half of the resource I/O stack: apart from reading
//! environment variables it never touches the filesystem. The companion
//! `strata-io` crate layers pooled, buffered file access on top of it.

pub mod category;
pub mod compose;
pub mod expand;
pub mod registry;

pub use category::ResourceCategory;
pub use compose::{compose, is_path_separator};
pub use expand::{expand_list, expand_segment, LIST_DELIMITER};
pub use registry::PathRegistry;
