//! Named theme presets

use serde::{Deserialize, Serialize};

use crate::options::LoaderOptions;

/// A bundle of default option values selected by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    Material,
    Ios,
    Minimal,
    Dark,
    Success,
    Error,
    Warning,
}

struct PresetValues {
    color: &'static str,
    variant: &'static str,
    speed: &'static str,
    overlay_color: Option<&'static str>,
    overlay_enabled: Option<bool>,
}

impl ThemePreset {
    pub const ALL: [Self; 7] = [
        Self::Material,
        Self::Ios,
        Self::Minimal,
        Self::Dark,
        Self::Success,
        Self::Error,
        Self::Warning,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Ios => "ios",
            Self::Minimal => "minimal",
            Self::Dark => "dark",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    const fn values(self) -> PresetValues {
        match self {
            Self::Material => PresetValues {
                color: "#2196F3",
                variant: "spinner",
                speed: "normal",
                overlay_color: Some("rgba(0, 0, 0, 0.6)"),
                overlay_enabled: None,
            },
            Self::Ios => PresetValues {
                color: "#007AFF",
                variant: "spinner",
                speed: "fast",
                overlay_color: Some("rgba(255, 255, 255, 0.9)"),
                overlay_enabled: None,
            },
            Self::Minimal => PresetValues {
                color: "#000000",
                variant: "dots",
                speed: "slow",
                overlay_color: None,
                overlay_enabled: Some(false),
            },
            Self::Dark => PresetValues {
                color: "#ffffff",
                variant: "pulse",
                speed: "normal",
                overlay_color: Some("rgba(0, 0, 0, 0.9)"),
                overlay_enabled: None,
            },
            Self::Success => PresetValues {
                color: "#4CAF50",
                variant: "pulse",
                speed: "fast",
                overlay_color: None,
                overlay_enabled: None,
            },
            Self::Error => PresetValues {
                color: "#F44336",
                variant: "heartbeat",
                speed: "fast",
                overlay_color: None,
                overlay_enabled: None,
            },
            Self::Warning => PresetValues {
                color: "#FF9800",
                variant: "wave",
                speed: "normal",
                overlay_color: None,
                overlay_enabled: None,
            },
        }
    }

    /// The preset expressed as options, ready to sit beneath explicit ones
    pub fn options(self) -> LoaderOptions {
        let values = self.values();
        LoaderOptions {
            color: Some(values.color.to_string()),
            variant: Some(values.variant.into()),
            speed: Some(values.speed.into()),
            overlay_color: values.overlay_color.map(str::to_string),
            overlay_enabled: values.overlay_enabled,
            ..LoaderOptions::default()
        }
    }

    /// Options for a theme name; unknown names yield an empty preset
    pub fn options_for(name: &str) -> LoaderOptions {
        Self::from_name(name).map(Self::options).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Speed, Variant};

    #[test]
    fn test_every_preset_round_trips_its_name() {
        for preset in ThemePreset::ALL {
            assert_eq!(ThemePreset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(ThemePreset::from_name("Material"), None);
    }

    #[test]
    fn test_preset_values() {
        let error = ThemePreset::Error.options();
        assert_eq!(error.color.as_deref(), Some("#F44336"));
        assert_eq!(error.variant, Some(Variant::Heartbeat));
        assert_eq!(error.speed, Some(Speed::Fast));
        assert_eq!(error.overlay_color, None);

        let warning = ThemePreset::Warning.options();
        assert_eq!(warning.variant, Some(Variant::Wave));

        let dark = ThemePreset::Dark.options();
        assert_eq!(dark.overlay_color.as_deref(), Some("rgba(0, 0, 0, 0.9)"));
    }

    #[test]
    fn test_unknown_theme_is_empty() {
        assert_eq!(ThemePreset::options_for("sepia"), LoaderOptions::default());
    }
}
