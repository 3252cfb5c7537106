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

//! Revision name generation
//!
//! Generated names have the form `<service>-<counter>-<suffix>`, where the
//! service name is truncated to leave room for the rest, the counter is the
//! previous revision's counter plus one, and the suffix is three random
//! lowercase letters.

use crate::infrastructure::constants::{
    MAX_REVISION_NAME_LEN, REVISION_COUNTER_WIDTH, REVISION_NAME_SEPARATOR,
    REVISION_SERVICE_PREFIX_LEN, REVISION_SUFFIX_LEN,
};
use crate::shared::error::{DescriptorError, Result};
use rand::Rng;
use regex::Regex;
use tracing::warn;

const REVISION_NAME_PATTERN: &str = r"^[a-z]([-a-z0-9]*[a-z0-9])?$";

const REVISION_NAME_RULE: &str = "revision names may contain only lowercase letters, digits and hyphens, must begin with a letter, must not end with a hyphen, and must be at most 63 characters long";

/// Whether `name` satisfies the revision naming rule.
pub fn is_valid_revision_name(name: &str) -> bool {
    name.len() <= MAX_REVISION_NAME_LEN
        && revision_name_pattern().is_ok_and(|re| re.is_match(name))
}

fn revision_name_pattern() -> Result<Regex> {
    Regex::new(REVISION_NAME_PATTERN).map_err(|e| {
        DescriptorError::validation_error(format!("Invalid revision name pattern: {}", e))
    })
}

/// Compute the revision name for the next deployment.
///
/// An explicit name is only checked for length and returned unchanged.
/// Otherwise a name is generated from `service_name`, continuing the counter
/// found in `previous`.
pub fn next_revision_name<R: Rng>(
    service_name: Option<&str>,
    explicit: Option<&str>,
    previous: Option<&str>,
    rng: &mut R,
) -> Result<String> {
    if let Some(explicit) = explicit {
        return validate_explicit_name(explicit);
    }

    let service_name = service_name.ok_or_else(|| {
        DescriptorError::validation_error(
            "Cannot generate a revision name: the descriptor has no metadata.name",
        )
    })?;

    let counter = match previous {
        Some(previous) => parse_revision_counter(previous)?
            .checked_add(1)
            .ok_or_else(|| {
                DescriptorError::validation_error(format!(
                    "Revision counter in '{}' cannot be incremented",
                    previous
                ))
            })?,
        None => 1,
    };

    generate_revision_name(service_name, counter, rng)
}

fn validate_explicit_name(name: &str) -> Result<String> {
    if name.len() > MAX_REVISION_NAME_LEN {
        return Err(DescriptorError::validation_error(format!(
            "Invalid revision name '{}': {}",
            name, REVISION_NAME_RULE
        )));
    }

    if !revision_name_pattern()?.is_match(name) {
        warn!("Revision name '{}' does not follow the naming rule: {}", name, REVISION_NAME_RULE);
    }

    Ok(name.to_string())
}

/// Read the counter segment (second to last) of a generated revision name.
pub fn parse_revision_counter(name: &str) -> Result<u32> {
    let segments: Vec<&str> = name.split(REVISION_NAME_SEPARATOR).collect();
    let counter = segments
        .len()
        .checked_sub(2)
        .and_then(|i| segments.get(i))
        .ok_or_else(|| {
            DescriptorError::validation_error(format!(
                "Previous revision name '{}' does not end in '-<counter>-<suffix>'",
                name
            ))
        })?;

    counter.parse::<u32>().map_err(|_| {
        DescriptorError::validation_error(format!(
            "Previous revision name '{}' has no numeric counter: expected '<service>-<counter>-<suffix>', found '{}' in the counter position",
            name, counter
        ))
    })
}

fn generate_revision_name<R: Rng>(
    service_name: &str,
    counter: u32,
    rng: &mut R,
) -> Result<String> {
    let prefix: String = service_name.chars().take(REVISION_SERVICE_PREFIX_LEN).collect();
    let prefix = prefix.trim_end_matches(REVISION_NAME_SEPARATOR);

    let suffix: String = (0..REVISION_SUFFIX_LEN)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();

    let name = format!(
        "{prefix}{sep}{counter:0width$}{sep}{suffix}",
        sep = REVISION_NAME_SEPARATOR,
        width = REVISION_COUNTER_WIDTH,
    );

    if name.len() > MAX_REVISION_NAME_LEN {
        return Err(DescriptorError::validation_error(format!(
            "Generated revision name '{}' is too long: {}",
            name, REVISION_NAME_RULE
        )));
    }

    if !revision_name_pattern()?.is_match(&name) {
        return Err(DescriptorError::validation_error(format!(
            "Service name '{}' cannot produce a valid revision name ('{}'): {}",
            service_name, name, REVISION_NAME_RULE
        )));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_first_revision_starts_at_one() {
        let name = next_revision_name(Some("svc"), None, None, &mut rng()).unwrap();
        let pattern = Regex::new(r"^svc-0001-[a-z]{3}$").unwrap();
        assert!(pattern.is_match(&name), "unexpected name {}", name);
    }

    #[test]
    fn test_counter_increments_from_previous() {
        let name = next_revision_name(Some("svc"), None, Some("svc-0005-abc"), &mut rng()).unwrap();
        let pattern = Regex::new(r"^svc-0006-[a-z]{3}$").unwrap();
        assert!(pattern.is_match(&name), "unexpected name {}", name);
        assert!(name.len() <= MAX_REVISION_NAME_LEN);
    }

    #[test]
    fn test_counter_follows_hyphenated_service_names() {
        let name = next_revision_name(
            Some("my-web-app"),
            None,
            Some("my-web-app-0041-qrs"),
            &mut rng(),
        )
        .unwrap();
        assert!(name.starts_with("my-web-app-0042-"));
    }

    #[test]
    fn test_counter_widens_past_four_digits() {
        let name = next_revision_name(Some("svc"), None, Some("svc-9999-abc"), &mut rng()).unwrap();
        assert!(name.starts_with("svc-10000-"));
    }

    #[test]
    fn test_long_service_name_is_truncated() {
        let service = "a".repeat(80);
        let name = next_revision_name(Some(&service), None, None, &mut rng()).unwrap();
        assert_eq!(name.len(), MAX_REVISION_NAME_LEN - 1);
        assert!(name.starts_with(&"a".repeat(REVISION_SERVICE_PREFIX_LEN)));
        assert!(is_valid_revision_name(&name));
    }

    #[test]
    fn test_truncation_does_not_leave_double_hyphen() {
        let service = format!("{}-tail", "b".repeat(REVISION_SERVICE_PREFIX_LEN - 1));
        let name = next_revision_name(Some(&service), None, None, &mut rng()).unwrap();
        assert!(!name.contains("--"));
        assert!(is_valid_revision_name(&name));
    }

    #[test]
    fn test_explicit_name_is_returned_unchanged() {
        let name =
            next_revision_name(Some("svc"), Some("custom-rev"), Some("svc-0005-abc"), &mut rng())
                .unwrap();
        assert_eq!(name, "custom-rev");
    }

    #[test]
    fn test_explicit_name_does_not_need_service_name() {
        let name = next_revision_name(None, Some("custom-rev"), None, &mut rng()).unwrap();
        assert_eq!(name, "custom-rev");
    }

    #[test]
    fn test_explicit_name_too_long_fails() {
        let explicit = "r".repeat(64);
        let err = next_revision_name(Some("svc"), Some(&explicit), None, &mut rng()).unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_explicit_name_at_limit_is_accepted() {
        let explicit = "r".repeat(63);
        assert!(next_revision_name(Some("svc"), Some(&explicit), None, &mut rng()).is_ok());
    }

    #[test]
    fn test_non_numeric_previous_counter_fails() {
        let err = next_revision_name(Some("svc"), None, Some("svc-latest-abc"), &mut rng())
            .unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
    }

    #[test]
    fn test_previous_without_segments_fails() {
        let err = next_revision_name(Some("svc"), None, Some("svc"), &mut rng()).unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
    }

    #[test]
    fn test_missing_service_name_fails_when_generating() {
        let err = next_revision_name(None, None, None, &mut rng()).unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
    }

    #[test]
    fn test_uppercase_service_name_fails() {
        for service in ["MyApp", "My_Svc"] {
            let err = next_revision_name(Some(service), None, None, &mut rng()).unwrap_err();
            assert!(matches!(err, DescriptorError::ValidationError(_)));
            assert!(err.to_string().contains(service));
        }
    }

    #[test]
    fn test_service_name_with_leading_digit_fails() {
        let err = next_revision_name(Some("9lives"), None, None, &mut rng()).unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
    }

    #[test]
    fn test_all_hyphen_service_name_fails() {
        let err = next_revision_name(Some("---"), None, Some("svc-0003-abc"), &mut rng())
            .unwrap_err();
        assert!(matches!(err, DescriptorError::ValidationError(_)));
    }

    #[test]
    fn test_parse_revision_counter() {
        assert_eq!(parse_revision_counter("svc-0005-abc").unwrap(), 5);
        assert_eq!(parse_revision_counter("a-b-0120-xyz").unwrap(), 120);
        assert!(parse_revision_counter("0005").is_err());
    }

    #[test]
    fn test_is_valid_revision_name() {
        assert!(is_valid_revision_name("svc-0001-abc"));
        assert!(is_valid_revision_name("a"));
        assert!(!is_valid_revision_name("Svc-0001-abc"));
        assert!(!is_valid_revision_name("1svc"));
        assert!(!is_valid_revision_name("svc-"));
        assert!(!is_valid_revision_name("svc_1"));
        assert!(!is_valid_revision_name(&"a".repeat(64)));
    }

    #[test]
    fn test_suffix_is_random_across_draws() {
        let mut rng = rng();
        let names: std::collections::HashSet<String> = (0..20)
            .map(|_| next_revision_name(Some("svc"), None, None, &mut rng).unwrap())
            .collect();
        assert!(names.len() > 1);
    }
}
