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

//! Environment variable input parsing
//!
//! Turns the `KEY1=VALUE1,KEY2=VALUE2` form accepted on the command line into
//! container environment entries.

use crate::infrastructure::constants::{ENV_KEY_VALUE_SEPARATOR, ENV_PAIR_SEPARATOR};
use crate::shared::error::{DescriptorError, Result};
use k8s_openapi::api::core::v1::EnvVar;

pub fn env_var(name: impl Into<String>, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

/// Parse comma-separated `KEY=VALUE` pairs, keeping input order.
///
/// The value is everything after the first `=`, so values may themselves
/// contain `=`. A key given twice keeps its first position and its last value.
pub fn parse_env_vars(input: &str) -> Result<Vec<EnvVar>> {
    let mut env_vars: Vec<EnvVar> = Vec::new();

    for pair in input.split(ENV_PAIR_SEPARATOR) {
        let (key, value) = pair.split_once(ENV_KEY_VALUE_SEPARATOR).ok_or_else(|| {
            DescriptorError::input_error(format!(
                "Invalid environment variable '{}'. Expected 'KEY=VALUE' pairs separated by commas, e.g. 'KEY1=VALUE1,KEY2=VALUE2'",
                pair
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(DescriptorError::input_error(format!(
                "Empty key in environment variable '{}'. Expected 'KEY=VALUE'",
                pair
            )));
        }

        let value = value.trim();
        match env_vars.iter_mut().find(|e| e.name == key) {
            Some(existing) => existing.value = Some(value.to_string()),
            None => env_vars.push(env_var(key, value)),
        }
    }

    Ok(env_vars)
}
