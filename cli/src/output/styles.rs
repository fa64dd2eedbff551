//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success messages (green)
    pub success: Style,
    /// Error messages (red)
    pub error: Style,
    /// In-progress steps (cyan)
    pub step: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// Links such as app URLs
    pub link: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.error = Style::new().red();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.link = Style::new().green().underline();
    }
}
