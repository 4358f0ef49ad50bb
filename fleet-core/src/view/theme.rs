//! src/view/theme.rs
//! ============================================================================
//! # Color palettes
//!
//! One [`Palette`] per [`ThemeName`]. Components never hard-code colors; they
//! ask the active palette for a named style.

use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, instrument};

use crate::config::ThemeName;
use crate::model::server::ServerStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 252),
    surface: Color::Rgb(232, 236, 243),
    foreground: Color::Rgb(33, 37, 41),
    muted: Color::Rgb(108, 117, 125),
    accent: Color::Rgb(74, 144, 226),
    border: Color::Rgb(173, 181, 189),
    highlight_bg: Color::Rgb(255, 236, 153),
    highlight_fg: Color::Rgb(33, 37, 41),
    success: Color::Rgb(40, 167, 69),
    info: Color::Rgb(23, 162, 184),
    warning: Color::Rgb(214, 140, 0),
    error: Color::Rgb(220, 53, 69),
};

const DARK: Palette = Palette {
    background: Color::Rgb(30, 30, 46),
    surface: Color::Rgb(69, 71, 90),
    foreground: Color::Rgb(205, 214, 244),
    muted: Color::Rgb(127, 132, 156),
    accent: Color::Rgb(137, 180, 250),
    border: Color::Rgb(88, 91, 112),
    highlight_bg: Color::Rgb(249, 226, 175),
    highlight_fg: Color::Rgb(30, 30, 46),
    success: Color::Rgb(166, 227, 161),
    info: Color::Rgb(137, 220, 235),
    warning: Color::Rgb(250, 179, 135),
    error: Color::Rgb(243, 139, 168),
};

const PINK: Palette = Palette {
    background: Color::Rgb(255, 240, 246),
    surface: Color::Rgb(252, 214, 230),
    foreground: Color::Rgb(74, 20, 54),
    muted: Color::Rgb(150, 90, 122),
    accent: Color::Rgb(214, 51, 132),
    border: Color::Rgb(230, 150, 190),
    highlight_bg: Color::Rgb(245, 194, 231),
    highlight_fg: Color::Rgb(74, 20, 54),
    success: Color::Rgb(46, 139, 87),
    info: Color::Rgb(137, 90, 200),
    warning: Color::Rgb(210, 105, 30),
    error: Color::Rgb(200, 30, 60),
};

const GREEN: Palette = Palette {
    background: Color::Rgb(240, 250, 242),
    surface: Color::Rgb(209, 236, 214),
    foreground: Color::Rgb(20, 54, 30),
    muted: Color::Rgb(90, 130, 100),
    accent: Color::Rgb(46, 139, 87),
    border: Color::Rgb(140, 190, 150),
    highlight_bg: Color::Rgb(200, 240, 140),
    highlight_fg: Color::Rgb(20, 54, 30),
    success: Color::Rgb(34, 139, 34),
    info: Color::Rgb(32, 128, 160),
    warning: Color::Rgb(190, 120, 0),
    error: Color::Rgb(190, 40, 40),
};

impl Palette {
    #[instrument(level = "debug")]
    pub fn for_theme(theme: ThemeName) -> Self {
        let palette = match theme {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
            ThemeName::Pink => PINK,
            ThemeName::Green => GREEN,
        };
        debug!(background = ?palette.background, accent = ?palette.accent, "Palette selected");
        palette
    }

    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    #[must_use]
    pub fn header(&self) -> Style {
        Style::default()
            .bg(self.surface)
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor_row(&self) -> Style {
        Style::default().bg(self.surface).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Search match inside a table cell.
    #[must_use]
    pub fn search_match(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn status(&self, status: ServerStatus) -> Style {
        let color = match status {
            ServerStatus::Running => self.success,
            ServerStatus::Stopped => self.muted,
            ServerStatus::Maintenance => self.warning,
        };
        Style::default().fg(color)
    }

    #[must_use]
    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn overlay(&self) -> Style {
        Style::default().bg(self.surface).fg(self.foreground)
    }
}

impl Default for Palette {
    fn default() -> Self {
        LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_theme_has_distinct_palette() {
        let palettes: Vec<Palette> = ThemeName::ALL.into_iter().map(Palette::for_theme).collect();
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Palette::default(), Palette::for_theme(ThemeName::Light));
    }
}
