//! Caption layout.
//!
//! Computes the vertical placement of the poem's lines inside the frame
//! and the geometry of the shared translucent panel behind them. Layout
//! is pure arithmetic over the theme's font metrics; nothing here touches
//! FFmpeg.

use vreel_models::render::OutputProfile;
use vreel_models::theme::ThemeConfig;

use crate::error::{MediaError, MediaResult};

/// Horizontal margin left around the text panel.
pub const PANEL_SIDE_MARGIN: u32 = 40;

/// Vertical padding added to the panel beyond the text block.
pub const PANEL_PADDING: u32 = 60;

/// Panel offset above the first line (half of [`PANEL_PADDING`]).
pub const PANEL_TOP_OFFSET: i32 = 30;

/// Horizontal margin for word wrapping of the text itself.
pub const TEXT_SIDE_MARGIN: u32 = 100;

/// Estimated average glyph width as a fraction of the font size, used for
/// word wrapping without font metrics.
const AVG_GLYPH_WIDTH_RATIO: f64 = 0.6;

/// One caption line placed on the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlacement {
    /// Wrapped visual rows of this line (at least one)
    pub rows: Vec<String>,
    /// Top edge of the line's vertical slot
    pub y: i32,
    /// Zero-based vertical slot index
    pub slot: usize,
}

/// Complete caption layout for one render.
#[derive(Debug, Clone)]
pub struct CaptionLayout {
    /// Height of one vertical slot in pixels
    pub line_height: i32,
    /// Combined height of all slots
    pub total_text_height: i32,
    /// Top edge of the first slot (text block is vertically centered)
    pub start_y: i32,
    /// Shared translucent panel behind all lines
    pub panel_width: u32,
    pub panel_height: u32,
    pub panel_y: i32,
    /// Placed lines, in input order
    pub lines: Vec<LinePlacement>,
}

/// Greedy word wrap to a maximum character count per row.
///
/// Words longer than the limit occupy a row of their own rather than
/// being split mid-word.
pub fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Lay out the poem's lines inside the frame.
///
/// Blank and whitespace-only lines are dropped before any slot is
/// assigned, so they never consume vertical space. Zero surviving lines
/// is a fatal error: there is nothing to render.
pub fn layout_captions(
    lines: &[String],
    theme: &ThemeConfig,
    profile: &OutputProfile,
) -> MediaResult<CaptionLayout> {
    let cleaned: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(MediaError::NoTextLines);
    }

    let line_height = (theme.font_size as f64 * theme.line_spacing) as i32;
    let total_text_height = cleaned.len() as i32 * line_height;
    let start_y = (profile.height as i32 - total_text_height) / 2;

    let wrap_width = profile.width.saturating_sub(TEXT_SIDE_MARGIN);
    let max_chars =
        ((wrap_width as f64) / (theme.font_size as f64 * AVG_GLYPH_WIDTH_RATIO)).max(1.0) as usize;

    let placed = cleaned
        .iter()
        .enumerate()
        .map(|(slot, line)| LinePlacement {
            rows: wrap_line(line, max_chars),
            y: start_y + slot as i32 * line_height,
            slot,
        })
        .collect();

    Ok(CaptionLayout {
        line_height,
        total_text_height,
        start_y,
        panel_width: profile.width.saturating_sub(PANEL_SIDE_MARGIN),
        panel_height: (total_text_height + PANEL_PADDING as i32).max(0) as u32,
        panel_y: start_y - PANEL_TOP_OFFSET,
        lines: placed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vreel_models::theme::{AnimationMode, Color, ColorPalette};

    fn theme() -> ThemeConfig {
        ThemeConfig {
            name: "Test".into(),
            description: String::new(),
            background_keywords: vec![],
            palette: ColorPalette {
                primary: Color::rgb(0, 0, 0),
                secondary: Color::rgb(255, 255, 255),
                accent: Color::rgb(100, 100, 100),
                background_overlay: Color::rgba(0, 0, 0, 0.3).unwrap(),
            },
            font_family: "serif".into(),
            font_size: 48,
            line_spacing: 1.4,
            default_animation: AnimationMode::FadeIn,
            poetry_topics: vec![],
        }
    }

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn centered_block() {
        let profile = OutputProfile::default();
        let layout = layout_captions(&lines(4), &theme(), &profile).unwrap();

        // line_height = 48 * 1.4 = 67 (integer truncation)
        assert_eq!(layout.line_height, 67);
        assert_eq!(layout.total_text_height, 4 * 67);
        assert_eq!(layout.start_y, (1920 - 4 * 67) / 2);

        // Slots tile the block exactly
        for (i, line) in layout.lines.iter().enumerate() {
            assert_eq!(line.slot, i);
            assert_eq!(line.y, layout.start_y + i as i32 * layout.line_height);
        }
        let last = layout.lines.last().unwrap();
        assert_eq!(
            last.y + layout.line_height,
            layout.start_y + layout.total_text_height
        );
    }

    #[test]
    fn panel_wraps_text_block() {
        let profile = OutputProfile::default();
        let layout = layout_captions(&lines(6), &theme(), &profile).unwrap();

        assert_eq!(layout.panel_width, 1080 - PANEL_SIDE_MARGIN);
        assert_eq!(
            layout.panel_height,
            (layout.total_text_height + PANEL_PADDING as i32) as u32
        );
        assert_eq!(layout.panel_y, layout.start_y - PANEL_TOP_OFFSET);
    }

    #[test]
    fn blank_lines_do_not_consume_slots() {
        let profile = OutputProfile::default();
        let input = vec![
            "first".to_string(),
            "   ".to_string(),
            String::new(),
            "second".to_string(),
        ];
        let layout = layout_captions(&input, &theme(), &profile).unwrap();

        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.total_text_height, 2 * layout.line_height);
        assert_eq!(layout.lines[1].rows[0], "second");
        assert_eq!(layout.lines[1].slot, 1);
    }

    #[test]
    fn all_blank_is_fatal() {
        let profile = OutputProfile::default();
        let input = vec!["  ".to_string(), String::new()];
        let err = layout_captions(&input, &theme(), &profile).unwrap_err();
        assert!(matches!(err, MediaError::NoTextLines));
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let rows = wrap_line("the quick brown fox jumps over the lazy dog", 15);
        assert!(rows.len() > 1);
        for row in &rows {
            assert!(row.chars().count() <= 15, "row too long: {row:?}");
        }
        assert_eq!(
            rows.join(" "),
            "the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        let rows = wrap_line("a extraordinarily long", 10);
        assert!(rows.contains(&"extraordinarily".to_string()));
    }

    #[test]
    fn short_lines_stay_single_row() {
        let profile = OutputProfile::default();
        let layout = layout_captions(&lines(3), &theme(), &profile).unwrap();
        for line in &layout.lines {
            assert_eq!(line.rows.len(), 1);
        }
    }
}
