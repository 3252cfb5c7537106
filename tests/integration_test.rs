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

#[cfg(test)]
mod tests {
    use regex::Regex;
    use service_revision::*;
    use std::io::Write;

    const SERVICE_CONFIG: &str = r#"
apiVersion: serving.knative.dev/v1
kind: Service
metadata:
  name: checkout
  labels:
    team: payments
spec:
  template:
    metadata:
      annotations:
        autoscaling.knative.dev/maxScale: "10"
    spec:
      containerConcurrency: 40
      containers:
        - image: gcr.io/shop/checkout:1.0.0
          ports:
            - containerPort: 8080
          env:
            - name: LOG_LEVEL
              value: info
"#;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// First deploy from a config file, then a redeploy with a new image and
    /// extra env vars merged into what was deployed.
    #[test]
    fn test_deploy_then_redeploy() {
        let config_file = write_config(".yaml", SERVICE_CONFIG);
        let config = load_descriptor_file(config_file.path().to_str().unwrap()).unwrap();

        let first = DescriptorBuilder::new().with_config(config).build().unwrap();
        assert_eq!(first.service_name(), Some("checkout"));
        assert_eq!(first.revision_name(), None);

        // What the control plane returns after the first deployment
        let mut deployed = first.clone();
        deployed.set_revision_name("checkout-0001-kqz");
        let deployed_yaml = render_descriptor(&deployed, DescriptorFormat::Yaml).unwrap();
        let deployed_file = write_config(".yaml", &deployed_yaml);
        let previous = load_descriptor_file(deployed_file.path().to_str().unwrap()).unwrap();
        assert_eq!(previous, deployed);

        let next = DescriptorBuilder::new()
            .with_name("checkout")
            .with_image("gcr.io/shop/checkout:1.1.0")
            .with_env_vars("FEATURE_X=on")
            .build()
            .unwrap();

        let merged = merge_into(&next, &previous).unwrap();

        let revision = merged.revision_name().unwrap();
        let pattern = Regex::new(r"^checkout-0002-[a-z]{3}$").unwrap();
        assert!(pattern.is_match(revision), "unexpected revision {}", revision);
        assert!(is_valid_revision_name(revision));

        let container = merged.first_container().unwrap();
        assert_eq!(container.image.as_deref(), Some("gcr.io/shop/checkout:1.1.0"));
        assert_eq!(
            container.env_vars(),
            &[env_var("FEATURE_X", "on"), env_var("LOG_LEVEL", "info")]
        );

        // Settings only the previous revision had are kept
        assert_eq!(merged.api_version.as_deref(), Some("serving.knative.dev/v1"));
        assert!(merged.metadata.extra.contains_key("labels"));
        let template = merged.spec.template.as_ref().unwrap();
        assert!(template.metadata.as_ref().unwrap().extra.contains_key("annotations"));
        assert!(template.spec.as_ref().unwrap().extra.contains_key("containerConcurrency"));
    }

    #[test]
    fn test_successive_revisions_keep_counting() {
        let mut previous = DescriptorBuilder::new()
            .with_name("svc")
            .with_image("img:1")
            .build()
            .unwrap();
        previous.set_revision_name("svc-0001-abc");

        for expected in 2..=4 {
            let current = DescriptorBuilder::new()
                .with_name("svc")
                .with_image(format!("img:{}", expected))
                .build()
                .unwrap();
            let merged = merge_into(&current, &previous).unwrap();
            let prefix = format!("svc-{:04}-", expected);
            assert!(merged.revision_name().unwrap().starts_with(&prefix));
            previous = merged;
        }
    }

    #[test]
    fn test_toml_config_builds_descriptor() {
        let config_file = write_config(
            ".toml",
            r#"
kind = "Service"

[metadata]
name = "worker"

[[spec.template.spec.containers]]
image = "gcr.io/shop/worker:3"
"#,
        );
        let config = load_descriptor_file(config_file.path().to_str().unwrap()).unwrap();
        let descriptor = DescriptorBuilder::new()
            .with_config(config)
            .with_env_vars("QUEUE=orders")
            .build()
            .unwrap();

        assert_eq!(descriptor.service_name(), Some("worker"));
        assert_eq!(
            descriptor.first_container().unwrap().env_vars(),
            &[env_var("QUEUE", "orders")]
        );
    }

    #[test]
    fn test_rendered_json_round_trips() {
        let descriptor = DescriptorBuilder::new()
            .with_name("svc")
            .with_image("img:1")
            .with_env_vars("A=1,B=2")
            .build()
            .unwrap();

        let json = render_descriptor(&descriptor, DescriptorFormat::Json).unwrap();
        let parsed = parse_descriptor(&json, DescriptorFormat::Json).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
