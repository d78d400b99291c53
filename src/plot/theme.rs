use ratatui::style::{Color, Modifier, Style};

/// The palette of the loss curve window: neon green on black with a cyan line.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(0, 0, 0);
    pub const FG_NEON: Color = Color::Rgb(57, 255, 20);
    pub const FG_DIM: Color = Color::Rgb(0, 190, 0);
    pub const FG_MUTED: Color = Color::Rgb(80, 90, 80);

    pub const ACCENT_CYAN: Color = Color::Rgb(0, 255, 255);

    /// Background of the whole window.
    pub fn base() -> Style {
        Style::default().fg(Self::FG_NEON).bg(Self::BG)
    }

    /// The chart frame.
    pub fn border() -> Style {
        Style::default().fg(Self::FG_NEON).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::FG_NEON)
            .add_modifier(Modifier::BOLD)
    }

    /// Axis titles and tick labels.
    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Key hints.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// The plotted line.
    pub fn curve() -> Style {
        Style::default().fg(Self::ACCENT_CYAN)
    }
}
