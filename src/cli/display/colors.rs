//! Color theme for CLI output

use super::EnvOrigin;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_origin_color(&self, origin: EnvOrigin) -> TableColor {
        match origin {
            EnvOrigin::Current => self.success,
            EnvOrigin::CarriedOver => self.info,
        }
    }

    /// Color for an optional field: muted when absent
    pub fn get_presence_color(&self, present: bool) -> TableColor {
        if present {
            self.success
        } else {
            self.muted
        }
    }
}
