//! Theme listing handler.

use axum::Json;
use serde::Serialize;

use vreel_content::theme_config;
use vreel_models::theme::{ColorPalette, ThemeKind};

/// One theme in the listing.
#[derive(Serialize)]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color_palette: ColorPalette,
    pub default_animation: String,
}

/// Theme list response.
#[derive(Serialize)]
pub struct ThemeListResponse {
    pub themes: Vec<ThemeSummary>,
}

/// List the built-in themes.
pub async fn list_themes() -> Json<ThemeListResponse> {
    let themes = ThemeKind::ALL
        .iter()
        .map(|kind| {
            let config = theme_config(*kind);
            ThemeSummary {
                id: kind.to_string(),
                name: config.name,
                description: config.description,
                color_palette: config.palette,
                default_animation: config.default_animation.to_string(),
            }
        })
        .collect();

    Json(ThemeListResponse { themes })
}
