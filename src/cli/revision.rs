//! Descriptor build and revision commands

use crate::cli::display::{DescriptorSummary, TableRenderer};
use crate::infrastructure::constants::CONFIG_FILE_ENV;
use crate::{
    load_descriptor_file, merge_into, render_descriptor, BuildOptions, Descriptor,
    DescriptorBuilder, DescriptorFormat,
};
use clap::{Args, Parser};

#[derive(Args, Debug, Clone)]
pub struct DescriptorInputs {
    /// Container image reference (replaces any containers from the config file)
    #[arg(long, short = 'i')]
    pub image: Option<String>,

    /// Service name (sets metadata.name)
    #[arg(long)]
    pub name: Option<String>,

    /// Environment variables for the first container (format: KEY1=VALUE1,KEY2=VALUE2)
    #[arg(long, value_name = "KEY=VALUE,...")]
    pub env_vars: Option<String>,

    /// Path to a service configuration file (YAML, JSON or TOML)
    /// If not provided, reads the path from SERVICE_REVISION_CONFIG when set
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Output format (yaml, json, toml)
    /// TOML output fails for descriptors holding null values
    #[arg(long, short = 'o', default_value = "yaml")]
    pub output: String,

    /// Write the descriptor to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Also print a summary table to stderr
    #[arg(long)]
    pub summary: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    #[command(flatten)]
    pub inputs: DescriptorInputs,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct ReviseCommand {
    #[command(flatten)]
    pub inputs: DescriptorInputs,

    /// Path to the previously deployed descriptor (e.g. exported from the control plane)
    #[arg(long, short = 'p', value_name = "PATH")]
    pub previous: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct SummaryCommand {
    /// Path to a descriptor file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,
}

impl DescriptorInputs {
    pub fn build_descriptor(&self) -> anyhow::Result<Descriptor> {
        self.build_descriptor_with_env_config(std::env::var(CONFIG_FILE_ENV).ok())
    }

    /// Build with `env_config` standing in for SERVICE_REVISION_CONFIG.
    pub fn build_descriptor_with_env_config(
        &self,
        env_config: Option<String>,
    ) -> anyhow::Result<Descriptor> {
        // Priority: --config > SERVICE_REVISION_CONFIG > none
        let config_path = self.config.clone().or(env_config);

        let config = match config_path {
            Some(ref path) => Some(
                load_descriptor_file(path)
                    .map_err(|e| anyhow::anyhow!("Failed to load service configuration: {}", e))?,
            ),
            None => None,
        };

        let descriptor = DescriptorBuilder::from_options(BuildOptions {
            image: self.image.clone(),
            name: self.name.clone(),
            env_vars: self.env_vars.clone(),
            config,
        })
        .build()?;

        Ok(descriptor)
    }
}

impl OutputOptions {
    fn emit(&self, descriptor: &Descriptor) -> anyhow::Result<()> {
        let format = self.output.parse::<DescriptorFormat>()?;
        let rendered = render_descriptor(descriptor, format)?;

        match self.out {
            Some(ref path) => {
                std::fs::write(path, rendered)
                    .map_err(|e| anyhow::anyhow!("Failed to write descriptor to {}: {}", path, e))?;
                eprintln!("✓ Descriptor written to: {}", path);
            }
            None => print!("{}", rendered),
        }

        Ok(())
    }
}

impl BuildCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let descriptor = self.inputs.build_descriptor()?;
        self.output.emit(&descriptor)?;

        if self.output.summary {
            let renderer = TableRenderer::new();
            eprintln!(
                "{}",
                renderer.render_descriptor_summary(&DescriptorSummary::from_descriptor(&descriptor))
            );
        }

        Ok(())
    }
}

impl ReviseCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let current = self.inputs.build_descriptor()?;

        let previous = load_descriptor_file(&self.previous)
            .map_err(|e| anyhow::anyhow!("Failed to load previous descriptor: {}", e))?;

        let merged = merge_into(&current, &previous).map_err(|e| {
            anyhow::anyhow!("Failed to merge into {}: {}", self.previous, e)
        })?;

        self.output.emit(&merged)?;

        if self.output.summary {
            let summary = DescriptorSummary::from_merge(&current, &merged);
            let renderer = TableRenderer::new();
            eprintln!("{}", renderer.render_descriptor_summary(&summary));
        }

        Ok(())
    }
}

impl SummaryCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let descriptor = load_descriptor_file(&self.file)?;

        let renderer = TableRenderer::new();
        println!(
            "{}",
            renderer.render_descriptor_summary(&DescriptorSummary::from_descriptor(&descriptor))
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CliArgs, Commands};

    #[test]
    fn test_parse_revise_command() {
        let args = CliArgs::parse_from([
            "service-revision",
            "revise",
            "--name",
            "hello",
            "--image",
            "gcr.io/demo/hello:2",
            "--env-vars",
            "A=1,B=2",
            "--previous",
            "prev.yaml",
            "-o",
            "json",
        ]);

        match args.command {
            Commands::Revise(cmd) => {
                assert_eq!(cmd.inputs.name.as_deref(), Some("hello"));
                assert_eq!(cmd.inputs.env_vars.as_deref(), Some("A=1,B=2"));
                assert_eq!(cmd.previous, "prev.yaml");
                assert_eq!(cmd.output.output, "json");
                assert!(!cmd.output.summary);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_build_descriptor_from_flags() {
        let inputs = DescriptorInputs {
            image: Some("gcr.io/demo/hello:1".to_string()),
            name: Some("hello".to_string()),
            env_vars: None,
            config: None,
        };

        let descriptor = inputs.build_descriptor_with_env_config(None).unwrap();
        assert_eq!(descriptor.service_name(), Some("hello"));
    }

    #[test]
    fn test_config_path_falls_back_to_env_value() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"metadata:\n  name: from-env\nspec:\n  template:\n    spec:\n      containers:\n        - image: env/image:1\n",
        )
        .unwrap();
        let inputs = DescriptorInputs {
            image: None,
            name: None,
            env_vars: None,
            config: None,
        };

        let descriptor = inputs
            .build_descriptor_with_env_config(Some(file.path().to_string_lossy().into_owned()))
            .unwrap();
        assert_eq!(descriptor.service_name(), Some("from-env"));
    }

    #[test]
    fn test_config_flag_wins_over_env_value() {
        let inputs = DescriptorInputs {
            image: None,
            name: None,
            env_vars: None,
            config: Some("/nonexistent/flag.yaml".to_string()),
        };

        let err = inputs
            .build_descriptor_with_env_config(Some("/nonexistent/env.yaml".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("flag.yaml"));
    }
}
