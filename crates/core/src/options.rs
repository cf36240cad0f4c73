//! Loader options and the resolved configuration
//!
//! [`LoaderOptions`] is what callers hand in: every field optional, readable
//! from JSON or a JS object. [`Config`] is the resolved value the widget
//! owns, with theme presets and defaults already applied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::FpCategory;

use crate::error::LoaderResult;
use crate::theme::ThemePreset;

pub const DEFAULT_COLOR: &str = "#3498db";
pub const DEFAULT_OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.5)";
pub const DEFAULT_LABEL: &str = "Loading...";

/// Visual style of the indicator
///
/// Unknown names are kept verbatim in [`Variant::Other`] so the root class
/// still reflects what the caller asked for; they render as a spinner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    #[default]
    Spinner,
    Dots,
    Pulse,
    Bar,
    Wave,
    Bounce,
    Ring,
    Heartbeat,
    Progress,
    Other(String),
}

impl Variant {
    pub const KNOWN: [Self; 9] = [
        Self::Spinner,
        Self::Dots,
        Self::Pulse,
        Self::Bar,
        Self::Wave,
        Self::Bounce,
        Self::Ring,
        Self::Heartbeat,
        Self::Progress,
    ];

    pub fn parse(name: &str) -> Self {
        match name {
            "spinner" => Self::Spinner,
            "dots" => Self::Dots,
            "pulse" => Self::Pulse,
            "bar" => Self::Bar,
            "wave" => Self::Wave,
            "bounce" => Self::Bounce,
            "ring" => Self::Ring,
            "heartbeat" => Self::Heartbeat,
            "progress" => Self::Progress,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Spinner => "spinner",
            Self::Dots => "dots",
            Self::Pulse => "pulse",
            Self::Bar => "bar",
            Self::Wave => "wave",
            Self::Bounce => "bounce",
            Self::Ring => "ring",
            Self::Heartbeat => "heartbeat",
            Self::Progress => "progress",
            Self::Other(name) => name,
        }
    }

    /// An empty name selects the default variant
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(name) if name.is_empty())
    }
}

impl From<String> for Variant {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for Variant {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.name().to_string()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Indicator size: a named step or an explicit pixel value
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSize", into = "RawSize")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
    Pixels(f64),
    Other(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Pixels(f64),
    Name(String),
}

impl Size {
    pub fn parse(name: &str) -> Self {
        match name {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            other => Self::Other(other.to_string()),
        }
    }

    /// Zero, NaN and the empty name select the default size
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Pixels(px) => matches!(px.classify(), FpCategory::Zero | FpCategory::Nan),
            Self::Other(name) => name.is_empty(),
            _ => false,
        }
    }

    /// Pixel edge length, `None` for an unrecognized name
    #[must_use]
    pub const fn pixels(&self) -> Option<f64> {
        match self {
            Self::Small => Some(32.0),
            Self::Medium => Some(48.0),
            Self::Large => Some(64.0),
            Self::Pixels(px) => Some(*px),
            Self::Other(_) => None,
        }
    }

    /// Value written to `--loader-size`.
    ///
    /// Unrecognized names are passed through (`hugepx`), which the host
    /// rejects as an invalid length.
    pub fn css_value(&self) -> String {
        match (self.pixels(), self) {
            (Some(px), _) => format!("{px}px"),
            (None, Self::Other(name)) => format!("{name}px"),
            (None, _) => String::new(),
        }
    }
}

impl From<RawSize> for Size {
    fn from(raw: RawSize) -> Self {
        match raw {
            RawSize::Pixels(px) => Self::Pixels(px),
            RawSize::Name(name) => Self::parse(&name),
        }
    }
}

impl From<Size> for RawSize {
    fn from(size: Size) -> Self {
        match size {
            Size::Small => Self::Name("small".into()),
            Size::Medium => Self::Name("medium".into()),
            Size::Large => Self::Name("large".into()),
            Size::Pixels(px) => Self::Pixels(px),
            Size::Other(name) => Self::Name(name),
        }
    }
}

impl From<&str> for Size {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<f64> for Size {
    fn from(px: f64) -> Self {
        Self::Pixels(px)
    }
}

impl From<u32> for Size {
    fn from(px: u32) -> Self {
        Self::Pixels(f64::from(px))
    }
}

/// Animation speed, mapped to a CSS duration
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Other(String),
}

impl Speed {
    pub fn parse(name: &str) -> Self {
        match name {
            "slow" => Self::Slow,
            "normal" => Self::Normal,
            "fast" => Self::Fast,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Other(name) => name,
        }
    }

    /// An empty name selects the default speed
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(name) if name.is_empty())
    }

    #[must_use]
    pub const fn duration(&self) -> Option<&'static str> {
        match self {
            Self::Slow => Some("1.5s"),
            Self::Normal => Some("1s"),
            Self::Fast => Some("0.6s"),
            Self::Other(_) => None,
        }
    }

    /// Value written to `--loader-speed`; unknown names pass through as-is
    pub fn css_value(&self) -> String {
        self.duration()
            .map_or_else(|| self.name().to_string(), str::to_string)
    }
}

impl From<String> for Speed {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for Speed {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<Speed> for String {
    fn from(speed: Speed) -> Self {
        speed.name().to_string()
    }
}

/// Caller-supplied options; every field may be left unset
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    #[serde(alias = "type", skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,

    #[serde(alias = "overlay", skip_serializing_if = "Option::is_none")]
    pub overlay_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,

    #[serde(alias = "ariaLabel", skip_serializing_if = "Option::is_none")]
    pub accessibility_label: Option<String>,

    #[serde(alias = "className", skip_serializing_if = "Option::is_none")]
    pub extra_class_name: Option<String>,

    #[serde(alias = "customCSS", skip_serializing_if = "Option::is_none")]
    pub custom_style_overrides: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LoaderOptions {
    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<Variant>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    #[must_use]
    pub const fn with_overlay(mut self, enabled: bool) -> Self {
        self.overlay_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_overlay_color(mut self, color: impl Into<String>) -> Self {
        self.overlay_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: impl Into<Speed>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.extra_class_name = Some(class_name.into());
        self
    }

    /// Add one style override; later calls for the same property win
    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_style_overrides
            .get_or_insert_with(BTreeMap::new)
            .insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Field-wise fallback: values set on `self` win over `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            color: self.color.or(fallback.color),
            size: self.size.or(fallback.size),
            variant: self.variant.or(fallback.variant),
            overlay_enabled: self.overlay_enabled.or(fallback.overlay_enabled),
            overlay_color: self.overlay_color.or(fallback.overlay_color),
            speed: self.speed.or(fallback.speed),
            accessibility_label: self.accessibility_label.or(fallback.accessibility_label),
            extra_class_name: self.extra_class_name.or(fallback.extra_class_name),
            custom_style_overrides: self
                .custom_style_overrides
                .or(fallback.custom_style_overrides),
            theme: self.theme.or(fallback.theme),
        }
    }
}

/// Fully resolved configuration owned by a loader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub color: String,
    pub size: Size,
    pub variant: Variant,
    pub overlay_enabled: bool,
    pub overlay_color: String,
    pub speed: Speed,
    pub accessibility_label: String,
    pub extra_class_name: String,
    pub custom_style_overrides: BTreeMap<String, String>,
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(LoaderOptions::default())
    }
}

impl Config {
    /// Resolve options against their theme preset and the defaults.
    ///
    /// Explicit options win over the preset; an unknown theme contributes
    /// nothing. Empty strings, a zero size and a blank variant or speed
    /// count as unset and fall back to the built-in default, even when the
    /// preset names a value.
    pub fn resolve(options: LoaderOptions) -> Self {
        let preset = options
            .theme
            .as_deref()
            .map(ThemePreset::options_for)
            .unwrap_or_default();
        let merged = options.or(preset);

        Self {
            color: non_empty(merged.color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            size: merged.size.filter(|s| !s.is_blank()).unwrap_or_default(),
            variant: merged.variant.filter(|v| !v.is_blank()).unwrap_or_default(),
            overlay_enabled: merged.overlay_enabled.unwrap_or(true),
            overlay_color: non_empty(merged.overlay_color)
                .unwrap_or_else(|| DEFAULT_OVERLAY_COLOR.to_string()),
            speed: merged.speed.filter(|s| !s.is_blank()).unwrap_or_default(),
            accessibility_label: non_empty(merged.accessibility_label)
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            extra_class_name: merged.extra_class_name.unwrap_or_default(),
            custom_style_overrides: merged.custom_style_overrides.unwrap_or_default(),
            theme: merged.theme,
        }
    }

    /// Shallow merge used by `update`: every set field replaces the stored one.
    ///
    /// The theme is recorded but not re-resolved.
    pub fn merge(&mut self, partial: LoaderOptions) {
        if let Some(color) = partial.color {
            self.color = color;
        }
        if let Some(size) = partial.size {
            self.size = size;
        }
        if let Some(variant) = partial.variant {
            self.variant = variant;
        }
        if let Some(enabled) = partial.overlay_enabled {
            self.overlay_enabled = enabled;
        }
        if let Some(color) = partial.overlay_color {
            self.overlay_color = color;
        }
        if let Some(speed) = partial.speed {
            self.speed = speed;
        }
        if let Some(label) = partial.accessibility_label {
            self.accessibility_label = label;
        }
        if let Some(class_name) = partial.extra_class_name {
            self.extra_class_name = class_name;
        }
        if let Some(overrides) = partial.custom_style_overrides {
            self.custom_style_overrides = overrides;
        }
        if partial.theme.is_some() {
            self.theme = partial.theme;
        }
    }

    #[must_use]
    pub fn is_progress(&self) -> bool {
        self.variant == Variant::Progress
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.color, "#3498db");
        assert_eq!(config.size, Size::Medium);
        assert_eq!(config.variant, Variant::Spinner);
        assert!(config.overlay_enabled);
        assert_eq!(config.overlay_color, "rgba(0, 0, 0, 0.5)");
        assert_eq!(config.speed, Speed::Normal);
        assert_eq!(config.accessibility_label, "Loading...");
        assert!(config.extra_class_name.is_empty());
        assert!(config.custom_style_overrides.is_empty());
        assert_eq!(config.theme, None);
    }

    #[test]
    fn test_theme_preset_fills_unset_fields() {
        let config = Config::resolve(LoaderOptions::default().with_theme("ios"));
        assert_eq!(config.color, "#007AFF");
        assert_eq!(config.variant, Variant::Spinner);
        assert_eq!(config.speed, Speed::Fast);
        assert_eq!(config.overlay_color, "rgba(255, 255, 255, 0.9)");
        assert_eq!(config.theme.as_deref(), Some("ios"));
    }

    #[test]
    fn test_explicit_option_beats_theme() {
        let config = Config::resolve(
            LoaderOptions::default()
                .with_theme("ios")
                .with_color("#000000"),
        );
        assert_eq!(config.color, "#000000");
        assert_eq!(config.speed, Speed::Fast);
    }

    #[test]
    fn test_minimal_theme_disables_overlay_unless_asked() {
        let config = Config::resolve(LoaderOptions::default().with_theme("minimal"));
        assert!(!config.overlay_enabled);
        assert_eq!(config.variant, Variant::Dots);

        let config = Config::resolve(
            LoaderOptions::default()
                .with_theme("minimal")
                .with_overlay(true),
        );
        assert!(config.overlay_enabled);
    }

    #[test]
    fn test_unknown_theme_resolves_to_defaults() {
        let config = Config::resolve(LoaderOptions::default().with_theme("neon"));
        assert_eq!(config.color, DEFAULT_COLOR);
        assert_eq!(config.variant, Variant::Spinner);
        assert_eq!(config.theme.as_deref(), Some("neon"));
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let config = Config::resolve(
            LoaderOptions::default()
                .with_theme("error")
                .with_color("")
                .with_label(""),
        );
        assert_eq!(config.color, DEFAULT_COLOR);
        assert_eq!(config.accessibility_label, DEFAULT_LABEL);
    }

    #[test]
    fn test_blank_variant_size_and_speed_fall_back_to_defaults() {
        let options =
            LoaderOptions::from_json(r#"{"type": "", "size": 0, "speed": ""}"#).unwrap();
        let config = Config::resolve(options);
        assert_eq!(config.variant, Variant::Spinner);
        assert_eq!(config.size, Size::Medium);
        assert_eq!(config.size.css_value(), "48px");
        assert_eq!(config.speed, Speed::Normal);
        assert_eq!(config.speed.css_value(), "1s");

        let themed = Config::resolve(
            LoaderOptions::default()
                .with_theme("warning")
                .with_variant("")
                .with_speed(""),
        );
        assert_eq!(themed.variant, Variant::Spinner);
        assert_eq!(themed.speed, Speed::Normal);
    }

    #[test]
    fn test_merge_is_shallow_and_skips_theme_resolution() {
        let mut config = Config::default();
        config.merge(LoaderOptions::default().with_theme("success").with_variant("dots"));
        assert_eq!(config.variant, Variant::Dots);
        assert_eq!(config.theme.as_deref(), Some("success"));
        // success would have set the color, but merge never consults presets
        assert_eq!(config.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_merge_replaces_style_overrides_wholesale() {
        let mut config =
            Config::resolve(LoaderOptions::default().with_style("margin", "4px"));
        config.merge(LoaderOptions::default().with_style("padding", "2px"));
        assert_eq!(config.custom_style_overrides.len(), 1);
        assert_eq!(config.custom_style_overrides["padding"], "2px");
    }

    #[test]
    fn test_options_accept_alias_field_names() {
        let options = LoaderOptions::from_json(
            r##"{
                "type": "wave",
                "overlay": false,
                "ariaLabel": "Fetching",
                "className": "big",
                "customCSS": {"backgroundColor": "red"},
                "size": 20
            }"##,
        )
        .unwrap();
        assert_eq!(options.variant, Some(Variant::Wave));
        assert_eq!(options.overlay_enabled, Some(false));
        assert_eq!(options.accessibility_label.as_deref(), Some("Fetching"));
        assert_eq!(options.extra_class_name.as_deref(), Some("big"));
        assert_eq!(options.size, Some(Size::Pixels(20.0)));
        assert_eq!(
            options.custom_style_overrides.unwrap()["backgroundColor"],
            "red"
        );
    }

    #[test]
    fn test_options_accept_camel_case_names() {
        let options = LoaderOptions::from_json(
            r#"{"variant": "progress", "overlayEnabled": true, "speed": "slow", "size": "large"}"#,
        )
        .unwrap();
        assert_eq!(options.variant, Some(Variant::Progress));
        assert_eq!(options.overlay_enabled, Some(true));
        assert_eq!(options.speed, Some(Speed::Slow));
        assert_eq!(options.size, Some(Size::Large));
    }

    #[test]
    fn test_unknown_names_are_preserved() {
        let options =
            LoaderOptions::from_json(r#"{"type": "sparkle", "speed": "warp", "size": "huge"}"#)
                .unwrap();
        assert_eq!(options.variant, Some(Variant::Other("sparkle".into())));
        assert_eq!(options.speed, Some(Speed::Other("warp".into())));
        assert_eq!(options.size, Some(Size::Other("huge".into())));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = LoaderOptions::from_json(r#"{"overlay": "yes"}"#).unwrap_err();
        assert!(matches!(err, crate::LoaderError::InvalidOptions { .. }));
    }

    #[test]
    fn test_size_css_values() {
        assert_eq!(Size::Small.css_value(), "32px");
        assert_eq!(Size::Medium.css_value(), "48px");
        assert_eq!(Size::Large.css_value(), "64px");
        assert_eq!(Size::from(100_u32).css_value(), "100px");
        assert_eq!(Size::from(12.5).css_value(), "12.5px");
        assert_eq!(Size::from("huge").css_value(), "hugepx");
    }

    #[test]
    fn test_speed_css_values() {
        assert_eq!(Speed::Slow.css_value(), "1.5s");
        assert_eq!(Speed::Normal.css_value(), "1s");
        assert_eq!(Speed::Fast.css_value(), "0.6s");
        assert_eq!(Speed::from("warp").css_value(), "warp");
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(value["variant"], "spinner");
        assert_eq!(value["size"], "medium");
        assert_eq!(value["speed"], "normal");
        assert_eq!(value["overlayEnabled"], true);
        assert_eq!(value["accessibilityLabel"], "Loading...");
    }
}
