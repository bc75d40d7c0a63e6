//! Built-in theme table.
//!
//! Colors are parsed (and thereby validated) when a theme is first
//! requested; a malformed literal here is a programmer error, so
//! construction panics are acceptable and covered by tests.

use vreel_models::theme::{AnimationMode, Color, ColorPalette, ThemeConfig, ThemeKind};

fn hex(s: &str) -> Color {
    Color::from_hex(s).expect("valid hex literal in theme table")
}

fn rgba(s: &str) -> Color {
    Color::from_rgba_str(s).expect("valid rgba literal in theme table")
}

/// Configuration for a built-in theme.
pub fn theme_config(kind: ThemeKind) -> ThemeConfig {
    match kind {
        ThemeKind::Nature => ThemeConfig {
            name: "Nature".into(),
            description: "Peaceful nature scenes with organic themes".into(),
            background_keywords: ["forest", "trees", "grass", "leaves", "nature", "green"]
                .map(String::from)
                .to_vec(),
            palette: ColorPalette {
                primary: hex("#2d5016"),
                secondary: hex("#ffffff"),
                accent: hex("#8fbc8f"),
                background_overlay: rgba("rgba(0, 0, 0, 0.3)"),
            },
            font_family: "serif".into(),
            font_size: 48,
            line_spacing: 1.4,
            default_animation: AnimationMode::FadeIn,
            poetry_topics: ["nature", "growth", "seasons", "trees", "earth"]
                .map(String::from)
                .to_vec(),
        },
        ThemeKind::Ocean => ThemeConfig {
            name: "Ocean".into(),
            description: "Calming ocean and water scenes".into(),
            background_keywords: ["ocean", "waves", "water", "beach", "sea", "blue"]
                .map(String::from)
                .to_vec(),
            palette: ColorPalette {
                primary: hex("#1e3a8a"),
                secondary: hex("#ffffff"),
                accent: hex("#60a5fa"),
                background_overlay: rgba("rgba(0, 0, 0, 0.25)"),
            },
            font_family: "sans-serif".into(),
            font_size: 46,
            line_spacing: 1.3,
            default_animation: AnimationMode::SlideUp,
            poetry_topics: ["ocean", "water", "flow", "peace", "depth"]
                .map(String::from)
                .to_vec(),
        },
        ThemeKind::Sunset => ThemeConfig {
            name: "Sunset".into(),
            description: "Golden hour and sunset scenes".into(),
            background_keywords: ["sunset", "golden hour", "sky", "warm light", "horizon"]
                .map(String::from)
                .to_vec(),
            palette: ColorPalette {
                primary: hex("#92400e"),
                secondary: hex("#fef3c7"),
                accent: hex("#f59e0b"),
                background_overlay: rgba("rgba(0, 0, 0, 0.2)"),
            },
            font_family: "serif".into(),
            font_size: 50,
            line_spacing: 1.5,
            default_animation: AnimationMode::GentleZoom,
            poetry_topics: ["light", "time", "beauty", "reflection", "golden"]
                .map(String::from)
                .to_vec(),
        },
        ThemeKind::Minimal => ThemeConfig {
            name: "Minimal".into(),
            description: "Clean, minimal aesthetic".into(),
            background_keywords: ["minimal", "clean", "simple", "geometric", "abstract"]
                .map(String::from)
                .to_vec(),
            palette: ColorPalette {
                primary: hex("#1f2937"),
                secondary: hex("#ffffff"),
                accent: hex("#6b7280"),
                background_overlay: rgba("rgba(255, 255, 255, 0.1)"),
            },
            font_family: "sans-serif".into(),
            font_size: 44,
            line_spacing: 1.6,
            default_animation: AnimationMode::Typewriter,
            poetry_topics: ["simplicity", "clarity", "essence", "truth", "moment"]
                .map(String::from)
                .to_vec(),
        },
        ThemeKind::Forest => ThemeConfig {
            name: "Forest".into(),
            description: "Deep forest and woodland scenes".into(),
            background_keywords: ["forest", "woods", "trees", "shadows", "green", "natural"]
                .map(String::from)
                .to_vec(),
            palette: ColorPalette {
                primary: hex("#14532d"),
                secondary: hex("#ecfdf5"),
                accent: hex("#22c55e"),
                background_overlay: rgba("rgba(0, 0, 0, 0.4)"),
            },
            font_family: "serif".into(),
            font_size: 47,
            line_spacing: 1.4,
            default_animation: AnimationMode::WordByWord,
            poetry_topics: ["forest", "mystery", "growth", "ancient", "wisdom"]
                .map(String::from)
                .to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_themes_valid() {
        for kind in ThemeKind::ALL {
            let config = theme_config(*kind);
            config.validate().expect("built-in theme must validate");
            assert!(!config.poetry_topics.is_empty());
            assert!(!config.background_keywords.is_empty());
        }
    }

    #[test]
    fn overlays_are_translucent() {
        for kind in ThemeKind::ALL {
            let config = theme_config(*kind);
            assert!(
                !config.palette.background_overlay.is_opaque(),
                "{kind}: readability overlay must carry alpha"
            );
            assert!(config.palette.accent.is_opaque());
        }
    }
}
