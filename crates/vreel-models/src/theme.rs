//! Theme configuration: palettes, fonts and animation defaults.
//!
//! Themes are validated once at load time; render code never parses
//! colors or checks ranges again.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing or validating theme configuration.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Invalid color literal: {0}")]
    InvalidColor(String),

    #[error("Alpha out of range [0,1]: {0}")]
    InvalidAlpha(f64),

    #[error("Invalid theme field: {0}")]
    InvalidField(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Built-in theme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKind {
    Nature,
    Minimal,
    Ocean,
    Forest,
    Sunset,
}

impl ThemeKind {
    /// All built-in themes.
    pub const ALL: &'static [ThemeKind] = &[
        ThemeKind::Nature,
        ThemeKind::Minimal,
        ThemeKind::Ocean,
        ThemeKind::Forest,
        ThemeKind::Sunset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKind::Nature => "nature",
            ThemeKind::Minimal => "minimal",
            ThemeKind::Ocean => "ocean",
            ThemeKind::Forest => "forest",
            ThemeKind::Sunset => "sunset",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemeKind {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nature" => Ok(ThemeKind::Nature),
            "minimal" => Ok(ThemeKind::Minimal),
            "ocean" => Ok(ThemeKind::Ocean),
            "forest" => Ok(ThemeKind::Forest),
            "sunset" => Ok(ThemeKind::Sunset),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

/// Caption animation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// Staggered fade-in per line
    #[default]
    FadeIn,
    /// Fast reveal with a minimal fade
    Typewriter,
    /// Instant appearance, tight stagger
    SlideUp,
    /// Word-by-word style reveal (rendered as a mid-length fade)
    WordByWord,
    /// Slow fade with a gentle stagger
    GentleZoom,
}

impl AnimationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationMode::FadeIn => "fade_in",
            AnimationMode::Typewriter => "typewriter",
            AnimationMode::SlideUp => "slide_up",
            AnimationMode::WordByWord => "word_by_word",
            AnimationMode::GentleZoom => "gentle_zoom",
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnimationMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fade_in" => Ok(AnimationMode::FadeIn),
            "typewriter" => Ok(AnimationMode::Typewriter),
            "slide_up" => Ok(AnimationMode::SlideUp),
            "word_by_word" => Ok(AnimationMode::WordByWord),
            "gentle_zoom" => Ok(AnimationMode::GentleZoom),
            other => Err(ThemeError::InvalidField(format!("animation: {other}"))),
        }
    }
}

/// An RGB color with an alpha channel.
///
/// Serialized as either `#rrggbb` (opaque) or `rgba(r, g, b, a)` with
/// `a` in `[0, 1]`. Parsing rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Color with an explicit alpha. Fails when alpha is outside `[0, 1]`.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Result<Self, ThemeError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ThemeError::InvalidAlpha(alpha));
        }
        Ok(Self { r, g, b, alpha })
    }

    /// Parse a `#rrggbb` literal.
    pub fn from_hex(s: &str) -> Result<Self, ThemeError> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::InvalidColor(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ThemeError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// Parse an `rgba(r, g, b, a)` literal.
    pub fn from_rgba_str(s: &str) -> Result<Self, ThemeError> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ThemeError::InvalidColor(s.to_string()))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ThemeError::InvalidColor(s.to_string()));
        }

        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| ThemeError::InvalidColor(s.to_string()))
        };
        let alpha: f64 = parts[3]
            .parse()
            .map_err(|_| ThemeError::InvalidColor(s.to_string()))?;

        Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha)
    }

    /// Whether the color has no translucency.
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// FFmpeg color literal without alpha (`0xRRGGBB`).
    pub fn to_ffmpeg(&self) -> String {
        format!("0x{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// FFmpeg color literal carrying the alpha channel (`0xRRGGBB@0.30`).
    pub fn to_ffmpeg_alpha(&self) -> String {
        format!("0x{:02X}{:02X}{:02X}@{:.2}", self.r, self.g, self.b, self.alpha)
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with("rgba(") {
            Self::from_rgba_str(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ThemeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
        }
    }
}

impl JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

/// Theme color palette.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColorPalette {
    /// Brand color of the theme
    pub primary: Color,
    /// Caption text color
    pub secondary: Color,
    /// Solid-background fallback color
    pub accent: Color,
    /// Full-frame readability overlay (carries alpha)
    pub background_overlay: Color,
}

/// Complete theme configuration, validated at load time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThemeConfig {
    /// Display name
    pub name: String,
    /// Short description for listings
    pub description: String,
    /// Keywords used to match background footage
    pub background_keywords: Vec<String>,
    /// Color palette
    pub palette: ColorPalette,
    /// Font family passed to the text renderer
    pub font_family: String,
    /// Caption font size in pixels
    pub font_size: u32,
    /// Line spacing multiplier
    pub line_spacing: f64,
    /// Default caption animation
    pub default_animation: AnimationMode,
    /// Topics used to select curated poetry
    pub poetry_topics: Vec<String>,
}

impl ThemeConfig {
    /// Validate field ranges. Colors are validated by construction.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.font_size == 0 {
            return Err(ThemeError::InvalidField("font_size must be positive".into()));
        }
        if self.line_spacing <= 0.0 {
            return Err(ThemeError::InvalidField(
                "line_spacing must be positive".into(),
            ));
        }
        if self.font_family.trim().is_empty() {
            return Err(ThemeError::InvalidField("font_family must be set".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color() {
        let c = Color::from_hex("#8fbc8f").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x8f, 0xbc, 0x8f));
        assert!(c.is_opaque());
        assert_eq!(c.to_ffmpeg(), "0x8FBC8F");
    }

    #[test]
    fn parse_rgba_color() {
        let c = Color::from_rgba_str("rgba(0, 0, 0, 0.3)").unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert!((c.alpha - 0.3).abs() < f64::EPSILON);
        assert_eq!(c.to_ffmpeg_alpha(), "0x000000@0.30");
    }

    #[test]
    fn reject_bad_colors() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("nope").is_err());
        assert!(Color::from_rgba_str("rgba(0, 0, 0)").is_err());
        assert!(Color::from_rgba_str("rgba(0, 0, 0, 1.5)").is_err());
    }

    #[test]
    fn color_serde_roundtrip() {
        let opaque: Color = serde_json::from_str("\"#60a5fa\"").unwrap();
        assert_eq!(serde_json::to_string(&opaque).unwrap(), "\"#60a5fa\"");

        let translucent: Color = serde_json::from_str("\"rgba(0, 0, 0, 0.25)\"").unwrap();
        assert!(!translucent.is_opaque());
    }

    #[test]
    fn theme_kind_roundtrip() {
        for kind in ThemeKind::ALL {
            let parsed: ThemeKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        assert!("galaxy".parse::<ThemeKind>().is_err());
    }

    #[test]
    fn animation_mode_parse() {
        assert_eq!(
            "gentle_zoom".parse::<AnimationMode>().unwrap(),
            AnimationMode::GentleZoom
        );
        assert!("spin".parse::<AnimationMode>().is_err());
    }
}
