//! Marquee theme for cinelist
//!
//! Warm cinema palette: amber on charcoal, with red/green reserved for
//! error and success states.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and style helpers
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #121014 (charcoal)
    pub const BACKGROUND: Color = Color::Rgb(0x12, 0x10, 0x14);

    /// Primary: #ffb000 (marquee amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb0, 0x00);

    /// Secondary: #7fb8ff (projector blue)
    pub const SECONDARY: Color = Color::Rgb(0x7f, 0xb8, 0xff);

    /// Accent: #ffe28a (pale gold)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xe2, 0x8a);

    /// Text: #e8e4dc (screen white)
    pub const TEXT: Color = Color::Rgb(0xe8, 0xe4, 0xdc);

    /// Dim: #6a6470 (house lights down)
    pub const DIM: Color = Color::Rgb(0x6a, 0x64, 0x70);

    /// Success: #5fd38d
    pub const SUCCESS: Color = Color::Rgb(0x5f, 0xd3, 0x8d);

    /// Warning: #ff9f43
    pub const WARNING: Color = Color::Rgb(0xff, 0x9f, 0x43);

    /// Error: #ff5c5c
    pub const ERROR: Color = Color::Rgb(0xff, 0x5c, 0x5c);

    /// Panel background for inputs and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x22, 0x1e, 0x26);

    /// Unfocused border
    pub const BORDER: Color = Color::Rgb(0x80, 0x5c, 0x10);

    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted list row (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Informational messages (soft outcomes)
    pub fn info() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Field labels in the detail pane
    pub fn label() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/type metadata next to titles
    pub fn meta() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Rating color by score (IMDb 0-10 scale)
    pub fn rating(rating: f64) -> Style {
        if rating >= 7.5 {
            Self::success()
        } else if rating >= 6.0 {
            Self::warning()
        } else {
            Self::dimmed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Relative luminance of an sRGB color
    /// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
    fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    /// Contrast ratio between two colors, 1.0 to 21.0
    fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
        let l1 = relative_luminance(fg.0, fg.1, fg.2);
        let l2 = relative_luminance(bg.0, bg.1, bg.2);
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// WCAG AA for normal text
    fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
        contrast_ratio(fg, bg) >= 4.5
    }

    /// RGB tuple from a ratatui color (Rgb variant only)
    fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
        match color {
            Color::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        }
    }

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("theme colors are RGB")
    }

    #[test]
    fn test_message_colors_readable_on_background() {
        let bg = rgb(Theme::BACKGROUND);
        for (name, color) in [
            ("TEXT", Theme::TEXT),
            ("PRIMARY", Theme::PRIMARY),
            ("SECONDARY", Theme::SECONDARY),
            ("SUCCESS", Theme::SUCCESS),
            ("WARNING", Theme::WARNING),
            ("ERROR", Theme::ERROR),
        ] {
            let ratio = contrast_ratio(rgb(color), bg);
            assert!(meets_wcag_aa(rgb(color), bg), "{} contrast {:.2}:1", name, ratio);
        }
    }

    #[test]
    fn test_inverted_highlight_readable() {
        assert!(meets_wcag_aa(rgb(Theme::BACKGROUND), rgb(Theme::PRIMARY)));
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        assert!((contrast_ratio((0, 0, 0), (255, 255, 255)) - 21.0).abs() < 0.1);
        assert!((contrast_ratio((90, 90, 90), (90, 90, 90)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_rating_styles() {
        assert_eq!(Theme::rating(8.1), Theme::success());
        assert_eq!(Theme::rating(6.5), Theme::warning());
        assert_eq!(Theme::rating(3.0), Theme::dimmed());
    }
}
