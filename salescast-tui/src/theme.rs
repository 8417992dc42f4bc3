//! Dark neon palette for the dashboard.
//!
//! Each trace of the comparison chart gets a fixed color, so a method keeps
//! its color across actions no matter which other methods are toggled.

use ratatui::style::{Color, Modifier, Style};

use salescast_core::domain::ForecastMethod;
use salescast_core::merge::SourceLabel;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Palette bundle, for widgets that want colors rather than styles.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

/// Palette behind the free style helpers below.
const NEON: Theme = Theme::neon();

impl Theme {
    pub const fn neon() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            positive: POSITIVE,
            negative: NEGATIVE,
            warning: WARNING,
            neutral: NEUTRAL,
            muted: MUTED,
            text_primary: TEXT_PRIMARY,
            text_secondary: TEXT_SECONDARY,
        }
    }

    /// Color of one comparison trace.
    pub fn trace_color(&self, label: SourceLabel) -> Color {
        match label {
            SourceLabel::Actual => self.text_primary,
            SourceLabel::Forecast(ForecastMethod::Prophet) => self.positive,
            SourceLabel::Forecast(ForecastMethod::Arima) => self.warning,
            SourceLabel::Forecast(ForecastMethod::MovingAverage) => self.neutral,
        }
    }

    /// Color for a trace known only by name, as stored in a chart spec.
    pub fn trace_color_by_name(&self, name: &str) -> Color {
        if name == SourceLabel::Actual.as_str() {
            return self.trace_color(SourceLabel::Actual);
        }
        name.parse::<ForecastMethod>()
            .map(|m| self.trace_color(SourceLabel::Forecast(m)))
            .unwrap_or(self.accent)
    }
}

/// Frame fill behind every panel.
pub fn base() -> Style {
    Style::default().fg(NEON.text_primary).bg(NEON.background)
}

pub fn accent() -> Style {
    Style::default().fg(NEON.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(NEON.muted)
}

pub fn text() -> Style {
    Style::default().fg(NEON.text_primary)
}

pub fn secondary() -> Style {
    Style::default().fg(NEON.text_secondary)
}

pub fn positive() -> Style {
    Style::default().fg(NEON.positive)
}

pub fn negative() -> Style {
    Style::default().fg(NEON.negative)
}

pub fn warning() -> Style {
    Style::default().fg(NEON.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(NEON.neutral)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        secondary()
    }
}
