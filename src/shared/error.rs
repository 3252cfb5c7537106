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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, DescriptorError>;

#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The caller supplied insufficient or malformed construction inputs.
    #[error("Input error: {0}")]
    InputError(String),

    /// A structurally required invariant does not hold after construction.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Merge was invoked with a descriptor that lacks an expected container.
    #[error("Precondition violated: {0}")]
    PreconditionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl DescriptorError {
    pub fn input_error(context: impl Into<String>) -> Self {
        Self::InputError(context.into())
    }

    pub fn validation_error(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn precondition_error(context: impl Into<String>) -> Self {
        Self::PreconditionError(context.into())
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }
}
