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

use crate::domain::descriptor::env::parse_env_vars;
use crate::domain::descriptor::model::{Container, Descriptor};
use crate::shared::error::{DescriptorError, Result};
use tracing::debug;

/// Raw construction inputs for a descriptor.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub image: Option<String>,
    pub name: Option<String>,
    pub env_vars: Option<String>,
    pub config: Option<Descriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    options: BuildOptions,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.options.image = Some(image.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn with_env_vars(mut self, env_vars: impl Into<String>) -> Self {
        self.options.env_vars = Some(env_vars.into());
        self
    }

    pub fn with_config(mut self, config: Descriptor) -> Self {
        self.options.config = Some(config);
        self
    }

    /// Build the descriptor.
    ///
    /// `config` seeds the result when present; `name` and `image` then
    /// override it. An image always replaces the whole container list with a
    /// single container, and parsed env vars are written to that first
    /// container.
    pub fn build(self) -> Result<Descriptor> {
        let BuildOptions {
            image,
            name,
            env_vars,
            config,
        } = self.options;

        if (name.is_none() || image.is_none()) && config.is_none() {
            return Err(DescriptorError::input_error(
                "Missing deployment inputs: provide both a service name and an image, or a service configuration",
            ));
        }

        let mut descriptor = match config {
            Some(config) => {
                debug!("Seeding descriptor from supplied configuration");
                config
            }
            None => Descriptor::shell(),
        };

        if let Some(name) = name {
            descriptor.metadata.name = Some(name);
        }

        if let Some(image) = image {
            debug!("Using image {} as the only container", image);
            descriptor.revision_spec_mut().containers = Some(vec![Container::with_image(image)]);
        }

        if !descriptor.has_containers() {
            return Err(DescriptorError::validation_error(
                "No containers found: set an image, or define spec.template.spec.containers in the service configuration",
            ));
        }

        if let Some(env) = env_vars.as_deref().map(parse_env_vars).transpose()? {
            if let Some(container) = descriptor.first_container_mut() {
                debug!("Setting {} environment variable(s) on the first container", env.len());
                container.env = Some(env);
            }
        }

        Ok(descriptor)
    }
}
