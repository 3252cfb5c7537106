// Copyright 2025 JiangLong.
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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::config::{
    load_descriptor_file, parse_descriptor, render_descriptor, DescriptorFormat,
};
pub use domain::descriptor::{
    env_var, parse_env_vars, BuildOptions, Container, Descriptor, DescriptorBuilder, Metadata,
    RevisionSpec, RevisionTemplate, ServiceSpec,
};
pub use domain::revision::{
    is_valid_revision_name, merge_into, merge_into_with_rng, next_revision_name,
    reconcile_env_vars,
};
pub use shared::{DescriptorError, Result};
