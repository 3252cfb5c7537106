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

//! Typed shape of a service descriptor
//!
//! Only the fields the builder and merger act on are modelled. Every record
//! keeps the keys it does not model in `extra`, so a descriptor read from a
//! file renders back with those keys intact.

use crate::infrastructure::constants::SERVICE_KIND;
use k8s_openapi::api::core::v1::EnvVar;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Keys of a record that the descriptor shape does not model.
pub type Extra = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ServiceSpec,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<RevisionTemplate>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Template for the revisions of a service; its metadata carries the revision name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RevisionSpec>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Container {
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Default::default()
        }
    }

    pub fn env_vars(&self) -> &[EnvVar] {
        self.env.as_deref().unwrap_or_default()
    }
}

impl Descriptor {
    /// The empty `kind: Service` shell a descriptor starts from when no
    /// configuration is supplied.
    pub fn shell() -> Self {
        Self {
            kind: Some(SERVICE_KIND.to_string()),
            ..Default::default()
        }
    }

    pub fn service_name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    pub fn revision_name(&self) -> Option<&str> {
        self.spec
            .template
            .as_ref()
            .and_then(|t| t.metadata.as_ref())
            .and_then(|m| m.name.as_deref())
    }

    pub fn containers(&self) -> Option<&[Container]> {
        self.spec
            .template
            .as_ref()
            .and_then(|t| t.spec.as_ref())
            .and_then(|s| s.containers.as_deref())
    }

    pub fn first_container(&self) -> Option<&Container> {
        self.containers().and_then(|c| c.first())
    }

    pub fn first_container_mut(&mut self) -> Option<&mut Container> {
        self.spec
            .template
            .as_mut()
            .and_then(|t| t.spec.as_mut())
            .and_then(|s| s.containers.as_mut())
            .and_then(|c| c.first_mut())
    }

    pub fn has_containers(&self) -> bool {
        self.containers().is_some_and(|c| !c.is_empty())
    }

    /// Mutable access to `spec.template.spec`, creating the path when absent.
    pub fn revision_spec_mut(&mut self) -> &mut RevisionSpec {
        self.spec
            .template
            .get_or_insert_with(RevisionTemplate::default)
            .spec
            .get_or_insert_with(RevisionSpec::default)
    }

    pub fn set_revision_name(&mut self, name: impl Into<String>) {
        self.spec
            .template
            .get_or_insert_with(RevisionTemplate::default)
            .metadata
            .get_or_insert_with(Metadata::default)
            .name = Some(name.into());
    }
}
