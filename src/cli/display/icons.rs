//! Status icons for CLI output

use super::EnvOrigin;

/// Icons marking where a value came from
pub struct StatusIcon;

impl StatusIcon {
    /// Set by the current inputs
    pub const SET: &'static str = "✓";

    /// Carried over from the previous revision
    pub const CARRIED: &'static str = "↺";

    /// Missing value
    pub const MISSING: &'static str = "?";

    pub fn get_origin_icon(origin: EnvOrigin) -> &'static str {
        match origin {
            EnvOrigin::Current => Self::SET,
            EnvOrigin::CarriedOver => Self::CARRIED,
        }
    }

    pub fn get_origin_text(origin: EnvOrigin) -> &'static str {
        match origin {
            EnvOrigin::Current => "current",
            EnvOrigin::CarriedOver => "previous revision",
        }
    }
}
