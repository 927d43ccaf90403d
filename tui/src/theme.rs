//! Color theme and glyphs for the Nebula TUI.
//!
//! A slate/violet palette by default with an optional high-contrast
//! override; glyphs degrade to ASCII when configured.

use ratatui::style::{Color, Modifier, Style};

use nebula_engine::AppOptions;

/// Default palette constants (Tailwind slate/violet family).
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // slate-900
    pub const BG_PANEL: Color = Color::Rgb(30, 41, 59); // slate-800
    pub const BG_HIGHLIGHT: Color = Color::Rgb(51, 65, 85); // slate-700
    pub const BG_BORDER: Color = Color::Rgb(71, 85, 105); // slate-600

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(241, 245, 249); // slate-100
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // slate-400
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // slate-500

    // === Brand ===
    pub const PRIMARY: Color = Color::Rgb(167, 139, 250); // violet-400
    pub const PRIMARY_DIM: Color = Color::Rgb(124, 58, 237); // violet-600

    // === Accents ===
    pub const ACCENT: Color = Color::Rgb(56, 189, 248); // sky-400
    pub const SUCCESS: Color = Color::Rgb(74, 222, 128); // green-400
    pub const WARNING: Color = Color::Rgb(250, 204, 21); // yellow-400
    pub const ERROR: Color = Color::Rgb(251, 113, 133); // rose-400
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn new(options: AppOptions) -> Self {
        if options.high_contrast {
            return Self::high_contrast();
        }
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            primary_dim: colors::PRIMARY_DIM,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
        }
    }

    /// Pure black/white base with saturated accents.
    fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::Rgb(60, 60, 60),
            bg_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            primary: Color::Magenta,
            primary_dim: Color::Magenta,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

/// Display glyphs, with ASCII fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub spark: &'static str,
    pub dot: &'static str,
    pub spinner: &'static [&'static str],
}

const SPINNER_BRAILLE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

impl Glyphs {
    #[must_use]
    pub fn new(ascii_only: bool) -> Self {
        if ascii_only {
            Self {
                spark: "*",
                dot: "o",
                spinner: SPINNER_ASCII,
            }
        } else {
            Self {
                spark: "✦",
                dot: "●",
                spinner: SPINNER_BRAILLE,
            }
        }
    }

    /// Spinner frame for an animation tick.
    #[must_use]
    pub fn spinner_frame(&self, tick: u64) -> &'static str {
        // Slow the frame cadence down so the spinner is readable.
        let index = (tick / 8) as usize % self.spinner.len();
        self.spinner[index]
    }
}

#[cfg(test)]
mod tests {
    use nebula_engine::AppOptions;

    use super::{Glyphs, Palette};

    #[test]
    fn high_contrast_flips_base_colors() {
        let default = Palette::new(AppOptions::default());
        let contrast = Palette::new(AppOptions {
            high_contrast: true,
            ..AppOptions::default()
        });
        assert_ne!(default.bg_dark, contrast.bg_dark);
    }

    #[test]
    fn ascii_glyphs_are_ascii() {
        let glyphs = Glyphs::new(true);
        assert!(glyphs.spark.is_ascii());
        assert!(glyphs.spinner.iter().all(|frame| frame.is_ascii()));
    }

    #[test]
    fn spinner_cycles_through_frames() {
        let glyphs = Glyphs::new(true);
        let first = glyphs.spinner_frame(0);
        let later = glyphs.spinner_frame(8);
        assert_ne!(first, later);
    }
}
