//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::calendar::{CellFill, Channel};

/// Post channel, rgb(37, 99, 235)
const POST_RGB: (u8, u8, u8) = (37, 99, 235);

/// Life record channel, rgb(147, 51, 234)
const LIFE_RGB: (u8, u8, u8) = (147, 51, 234);

/// How a single calendar cell should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPaint {
    Solid(Color),
    /// Post color on the left, life color on the right
    Split { post: Color, life: Color },
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (keybinding keys, links, close button)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, labels, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date text color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// "No activity" cell background
    pub fn cell_background(self) -> Color {
        let (r, g, b) = self.background_rgb();
        Color::Rgb(r, g, b)
    }

    fn background_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Dark => (0x1a, 0x1a, 0x1a),
            Self::Light => (0xeb, 0xed, 0xf0),
        }
    }

    /// Full-strength color of a channel
    pub fn channel(self, channel: Channel) -> Color {
        let (r, g, b) = channel_rgb(channel);
        Color::Rgb(r, g, b)
    }

    /// Channel color at `opacity`, composited over the cell background
    pub fn channel_at(self, channel: Channel, opacity: f64) -> Color {
        let (r, g, b) = blend(channel_rgb(channel), self.background_rgb(), opacity);
        Color::Rgb(r, g, b)
    }

    /// Paint for a cell fill
    pub fn paint(self, fill: CellFill) -> CellPaint {
        match fill {
            CellFill::Background => CellPaint::Solid(self.cell_background()),
            CellFill::Solid {
                channel, opacity, ..
            } => CellPaint::Solid(self.channel_at(channel, opacity)),
            CellFill::Blend { opacity, .. } => CellPaint::Split {
                post: self.channel_at(Channel::Post, opacity),
                life: self.channel_at(Channel::Life, opacity),
            },
        }
    }
}

fn channel_rgb(channel: Channel) -> (u8, u8, u8) {
    match channel {
        Channel::Post => POST_RGB,
        Channel::Life => LIFE_RGB,
    }
}

/// Alpha-composite `fg` over `bg`
fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f64) -> (u8, u8, u8) {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f64::from(f) * alpha + f64::from(b) * (1.0 - alpha)).round() as u8;
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}
