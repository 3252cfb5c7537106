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

use crate::domain::descriptor::Descriptor;
use crate::shared::error::{DescriptorError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl DescriptorFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorFormat::Yaml => "yaml",
            DescriptorFormat::Json => "json",
            DescriptorFormat::Toml => "toml",
        }
    }

    /// Pick the format from a file extension; anything unrecognised is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => DescriptorFormat::Json,
            Some("toml") => DescriptorFormat::Toml,
            _ => DescriptorFormat::Yaml,
        }
    }
}

impl std::str::FromStr for DescriptorFormat {
    type Err = DescriptorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DescriptorFormat::Yaml),
            "json" => Ok(DescriptorFormat::Json),
            "toml" => Ok(DescriptorFormat::Toml),
            _ => Err(DescriptorError::config_error(format!(
                "Invalid descriptor format: {} (expected yaml, json or toml)",
                s
            ))),
        }
    }
}

pub fn load_descriptor_file(file_path: &str) -> Result<Descriptor> {
    let path = resolve_descriptor_path(file_path)?;

    if !path.exists() {
        return Err(DescriptorError::config_error(format!(
            "Service configuration file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        DescriptorError::config_error(format!(
            "Failed to read service configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let format = DescriptorFormat::from_path(&path);
    debug!("Loading {} descriptor from {}", format.as_str(), path.display());

    parse_descriptor(&content, format).map_err(|e| {
        DescriptorError::config_error(format!(
            "Failed to parse service configuration file {}: {}",
            path.display(),
            e
        ))
    })
}

pub fn parse_descriptor(content: &str, format: DescriptorFormat) -> Result<Descriptor> {
    let descriptor = match format {
        DescriptorFormat::Yaml => serde_yaml::from_str(content)?,
        DescriptorFormat::Json => serde_json::from_str(content)?,
        DescriptorFormat::Toml => toml::from_str(content)?,
    };
    Ok(descriptor)
}

pub fn render_descriptor(descriptor: &Descriptor, format: DescriptorFormat) -> Result<String> {
    let rendered = match format {
        DescriptorFormat::Yaml => serde_yaml::to_string(descriptor)?,
        DescriptorFormat::Json => serde_json::to_string_pretty(descriptor)?,
        DescriptorFormat::Toml => toml::to_string(descriptor)
            .map_err(|e| DescriptorError::config_error(e.to_string()))?,
    };
    Ok(rendered)
}

pub fn resolve_descriptor_path(path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(path);

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| DescriptorError::config_error(format!("Cannot get current directory: {}", e)))?
            .join(path))
    }
}
