//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::Descriptor;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use std::collections::HashSet;

/// Where an environment variable of the rendered descriptor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvOrigin {
    Current,
    CarriedOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvSummary {
    pub name: String,
    /// `None` when the variable is sourced through `valueFrom`
    pub value: Option<String>,
    pub origin: EnvOrigin,
}

/// Descriptor information for summary display
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSummary {
    pub service_name: Option<String>,
    pub revision_name: Option<String>,
    pub images: Vec<String>,
    pub env: Vec<EnvSummary>,
}

impl DescriptorSummary {
    pub fn from_descriptor(descriptor: &Descriptor) -> Self {
        Self::with_origin(descriptor, |_| EnvOrigin::Current)
    }

    /// Summary of a merged descriptor, marking env vars that `current` did
    /// not define as carried over.
    pub fn from_merge(current: &Descriptor, merged: &Descriptor) -> Self {
        let current_names: HashSet<&str> = current
            .first_container()
            .map(|c| c.env_vars().iter().map(|e| e.name.as_str()).collect())
            .unwrap_or_default();

        Self::with_origin(merged, |name| {
            if current_names.contains(name) {
                EnvOrigin::Current
            } else {
                EnvOrigin::CarriedOver
            }
        })
    }

    fn with_origin(descriptor: &Descriptor, origin: impl Fn(&str) -> EnvOrigin) -> Self {
        let images = descriptor
            .containers()
            .unwrap_or_default()
            .iter()
            .map(|c| c.image.clone().unwrap_or_else(|| "<none>".to_string()))
            .collect();

        let env = descriptor
            .first_container()
            .map(|c| c.env_vars())
            .unwrap_or_default()
            .iter()
            .map(|e| EnvSummary {
                name: e.name.clone(),
                value: e.value.clone(),
                origin: origin(&e.name),
            })
            .collect();

        Self {
            service_name: descriptor.service_name().map(str::to_owned),
            revision_name: descriptor.revision_name().map(str::to_owned),
            images,
            env,
        }
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the service, revision, images and environment of a descriptor
    pub fn render_descriptor_summary(&self, summary: &DescriptorSummary) -> String {
        let mut info = Table::new();
        info.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let service = summary.service_name.as_deref();
        let revision = summary.revision_name.as_deref();

        info.add_row(vec![
            Cell::new("Service"),
            Cell::new(service.unwrap_or("<unnamed>"))
                .fg(self.theme.get_presence_color(service.is_some())),
        ]);
        info.add_row(vec![
            Cell::new("Revision"),
            Cell::new(revision.unwrap_or("<unset>"))
                .fg(self.theme.get_presence_color(revision.is_some())),
        ]);
        for (index, image) in summary.images.iter().enumerate() {
            info.add_row(vec![
                Cell::new(format!("Container {}", index)),
                Cell::new(image).fg(self.theme.info),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Service Descriptor {} ─╮\n",
            format!("[{} containers]", summary.images.len()).bright_black()
        ));
        output.push_str(&info.to_string());
        output.push('\n');

        if summary.env.is_empty() {
            output.push_str("No environment variables on the first container\n");
            return output;
        }

        let mut env = Table::new();
        env.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
                Cell::new("SOURCE").set_alignment(CellAlignment::Center),
            ]);

        for var in &summary.env {
            let color = self.theme.get_origin_color(var.origin);
            let value = match var.value {
                Some(ref value) => Cell::new(value),
                None => Cell::new(format!("{} valueFrom", StatusIcon::MISSING))
                    .fg(self.theme.muted),
            };

            env.add_row(vec![
                Cell::new(&var.name),
                value,
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_origin_icon(var.origin),
                    StatusIcon::get_origin_text(var.origin)
                ))
                .fg(color),
            ]);
        }

        output.push_str(&env.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Set now  {} Carried over\n",
            StatusIcon::SET.green(),
            StatusIcon::CARRIED.cyan()
        ));

        output
    }
}
