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

use crate::domain::descriptor::{
    Descriptor, Extra, Metadata, RevisionSpec, RevisionTemplate, ServiceSpec,
};
use crate::domain::revision::name::next_revision_name;
use crate::shared::error::{DescriptorError, Result};
use k8s_openapi::api::core::v1::EnvVar;
use rand::Rng;
use serde_yaml::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// Merge `current` onto the previously deployed descriptor, producing the
/// next revision.
pub fn merge_into(current: &Descriptor, previous: &Descriptor) -> Result<Descriptor> {
    merge_into_with_rng(current, previous, &mut rand::thread_rng())
}

pub fn merge_into_with_rng<R: Rng>(
    current: &Descriptor,
    previous: &Descriptor,
    rng: &mut R,
) -> Result<Descriptor> {
    let current_container = current.first_container().ok_or_else(|| {
        DescriptorError::precondition_error(
            "Current descriptor has no container at spec.template.spec.containers[0]",
        )
    })?;
    let previous_container = previous.first_container().ok_or_else(|| {
        DescriptorError::precondition_error(
            "Previous descriptor has no container at spec.template.spec.containers[0]",
        )
    })?;

    let merged_env = reconcile_env_vars(current_container.env_vars(), previous_container.env_vars());

    let service_name = current.service_name().or(previous.service_name());
    let revision_name = next_revision_name(
        service_name,
        current.revision_name(),
        previous.revision_name(),
        rng,
    )?;

    let mut merged = overlay_descriptor(previous.clone(), current.clone());
    merged.set_revision_name(revision_name.as_str());
    if let Some(container) = merged.first_container_mut() {
        container.env = Some(merged_env);
    }

    info!(
        "Merged descriptor for service {} into revision {} (previous: {})",
        service_name.unwrap_or("<unnamed>"),
        revision_name,
        previous.revision_name().unwrap_or("<none>")
    );

    Ok(merged)
}

/// Combine env lists by name: current entries first, then previous entries
/// whose name the current list does not define.
pub fn reconcile_env_vars(current: &[EnvVar], previous: &[EnvVar]) -> Vec<EnvVar> {
    let mut merged_env: Vec<EnvVar> = Vec::with_capacity(current.len() + previous.len());

    for env_var in current {
        if let Some(existing) = merged_env.iter_mut().find(|e| e.name == env_var.name) {
            *existing = env_var.clone();
        } else {
            merged_env.push(env_var.clone());
        }
    }

    let mut seen_names: HashSet<String> = merged_env.iter().map(|e| e.name.clone()).collect();

    for env_var in previous {
        if seen_names.insert(env_var.name.clone()) {
            debug!("Carrying over environment variable {} from previous revision", env_var.name);
            merged_env.push(env_var.clone());
        }
    }

    merged_env
}

fn overlay_descriptor(base: Descriptor, overlay: Descriptor) -> Descriptor {
    Descriptor {
        api_version: overlay.api_version.or(base.api_version),
        kind: overlay.kind.or(base.kind),
        metadata: overlay_metadata(base.metadata, overlay.metadata),
        spec: overlay_service_spec(base.spec, overlay.spec),
        extra: overlay_extra(base.extra, overlay.extra),
    }
}

fn overlay_metadata(base: Metadata, overlay: Metadata) -> Metadata {
    Metadata {
        name: overlay.name.or(base.name),
        extra: overlay_extra(base.extra, overlay.extra),
    }
}

fn overlay_service_spec(base: ServiceSpec, overlay: ServiceSpec) -> ServiceSpec {
    ServiceSpec {
        template: overlay_record(base.template, overlay.template, overlay_template),
        extra: overlay_extra(base.extra, overlay.extra),
    }
}

fn overlay_template(base: RevisionTemplate, overlay: RevisionTemplate) -> RevisionTemplate {
    RevisionTemplate {
        metadata: overlay_record(base.metadata, overlay.metadata, overlay_metadata),
        spec: overlay_record(base.spec, overlay.spec, overlay_revision_spec),
        extra: overlay_extra(base.extra, overlay.extra),
    }
}

fn overlay_revision_spec(base: RevisionSpec, overlay: RevisionSpec) -> RevisionSpec {
    RevisionSpec {
        // Containers are replaced as a whole; env is reconciled separately.
        containers: overlay.containers.or(base.containers),
        extra: overlay_extra(base.extra, overlay.extra),
    }
}

fn overlay_record<T>(base: Option<T>, overlay: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, overlay) {
        (Some(base), Some(overlay)) => Some(merge(base, overlay)),
        (base, overlay) => overlay.or(base),
    }
}

fn overlay_extra(mut base: Extra, overlay: Extra) -> Extra {
    for (key, value) in overlay {
        let merged = match base.remove(&key) {
            Some(existing) => overlay_value(existing, value),
            None => value,
        };
        base.insert(key, merged);
    }
    base
}

/// Mappings merge key by key; any other overlay value replaces the base.
fn overlay_value(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => {
                        let prior = std::mem::replace(existing, Value::Null);
                        *existing = overlay_value(prior, value);
                    }
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
            Value::Mapping(base_map)
        }
        (_, overlay) => overlay,
    }
}
