//! Color scheme system for the notewalk TUI.
//!
//! Provides dark, light, and colorblind-friendly palettes for the tree
//! browser.

use ratatui::style::Color;

/// Color scheme for the notewalk TUI application.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Color for node titles with children.
    pub branch: Color,
    /// Color for leaf node titles.
    pub leaf: Color,
    /// Color for the tree-drawing indention glyphs.
    pub guide: Color,
    /// Color for the unfetched-children marker.
    pub pending: Color,
    /// Color for tag labels.
    pub tag: Color,

    /// Primary text color.
    pub text: Color,
    /// Dimmed/secondary text color (first paragraph snippets).
    pub text_dim: Color,
    /// Border color for panels/frames.
    pub border: Color,
    /// Background for the selected row.
    pub selected_bg: Color,

    /// Header foreground color.
    pub header_fg: Color,
    /// Header background color.
    pub header_bg: Color,
    /// Accent color for highlights and the current path.
    pub accent: Color,

    /// Status bar foreground color.
    pub status_fg: Color,
    /// Status bar background color.
    pub status_bg: Color,
    /// Key shortcut color.
    pub key_fg: Color,
    /// Error message color.
    pub error_fg: Color,
    /// Warning message color.
    pub warning_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            branch: Color::Rgb(100, 149, 237),
            leaf: Color::Rgb(220, 220, 220),
            guide: Color::Rgb(90, 90, 100),
            pending: Color::Rgb(255, 215, 0),
            tag: Color::Rgb(152, 195, 121),
            text: Color::Rgb(220, 220, 220),
            text_dim: Color::Rgb(140, 140, 140),
            border: Color::Rgb(80, 80, 90),
            selected_bg: Color::Rgb(50, 60, 90),
            header_fg: Color::Rgb(230, 230, 240),
            header_bg: Color::Rgb(35, 40, 55),
            accent: Color::Rgb(97, 175, 239),
            status_fg: Color::Rgb(200, 200, 210),
            status_bg: Color::Rgb(35, 40, 55),
            key_fg: Color::Rgb(255, 215, 0),
            error_fg: Color::Rgb(224, 108, 117),
            warning_fg: Color::Rgb(229, 192, 123),
        }
    }

    /// Light theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            branch: Color::Rgb(30, 80, 180),
            leaf: Color::Rgb(40, 40, 40),
            guide: Color::Rgb(170, 170, 180),
            pending: Color::Rgb(160, 110, 0),
            tag: Color::Rgb(60, 120, 40),
            text: Color::Rgb(40, 40, 40),
            text_dim: Color::Rgb(120, 120, 120),
            border: Color::Rgb(170, 170, 180),
            selected_bg: Color::Rgb(200, 215, 245),
            header_fg: Color::Rgb(30, 30, 40),
            header_bg: Color::Rgb(225, 228, 238),
            accent: Color::Rgb(20, 90, 200),
            status_fg: Color::Rgb(50, 50, 60),
            status_bg: Color::Rgb(225, 228, 238),
            key_fg: Color::Rgb(160, 110, 0),
            error_fg: Color::Rgb(190, 40, 50),
            warning_fg: Color::Rgb(150, 110, 20),
        }
    }

    /// Colorblind-friendly theme (blue/orange, no red/green contrasts).
    pub fn colorblind() -> Self {
        Self {
            branch: Color::Rgb(0, 114, 178),
            leaf: Color::Rgb(220, 220, 220),
            guide: Color::Rgb(100, 100, 110),
            pending: Color::Rgb(230, 159, 0),
            tag: Color::Rgb(86, 180, 233),
            text: Color::Rgb(220, 220, 220),
            text_dim: Color::Rgb(150, 150, 150),
            border: Color::Rgb(100, 100, 110),
            selected_bg: Color::Rgb(40, 70, 100),
            header_fg: Color::Rgb(230, 230, 240),
            header_bg: Color::Rgb(30, 45, 60),
            accent: Color::Rgb(86, 180, 233),
            status_fg: Color::Rgb(210, 210, 220),
            status_bg: Color::Rgb(30, 45, 60),
            key_fg: Color::Rgb(230, 159, 0),
            error_fg: Color::Rgb(213, 94, 0),
            warning_fg: Color::Rgb(240, 228, 66),
        }
    }

    /// Select a scheme by CLI name; unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }
}
