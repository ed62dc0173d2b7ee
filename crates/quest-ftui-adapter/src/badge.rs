//! Badge primitive: an icon with an optional label on a colored background.

use crate::render::{CellStyle, Rect, RenderFrame};
use crate::style::StyleToken;

/// Size token for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl BadgeSize {
    /// Cells before the icon in pill shape.
    #[must_use]
    pub fn leading_pad(self) -> usize {
        match self {
            Self::Sm => 0,
            Self::Md | Self::Lg => 1,
        }
    }
}

/// Outline of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeShape {
    /// Icon and label with padding after the label.
    Pill { trailing_pad: usize },
    /// Fixed-width cell block with the icon centered.
    Glyph { width: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeSpec {
    pub icon: char,
    pub label: Option<String>,
    pub token: StyleToken,
    pub size: BadgeSize,
    pub shape: BadgeShape,
}

impl BadgeSpec {
    /// Text content of the badge, padding included.
    #[must_use]
    pub fn text(&self) -> String {
        match self.shape {
            BadgeShape::Pill { trailing_pad } => {
                let mut text = " ".repeat(self.size.leading_pad());
                text.push(self.icon);
                if let Some(label) = &self.label {
                    text.push(' ');
                    text.push_str(label);
                }
                text.push_str(&" ".repeat(trailing_pad));
                text
            }
            BadgeShape::Glyph { width } => {
                let width = width.max(1);
                let left = (width - 1) / 2;
                let right = width - 1 - left;
                format!("{}{}{}", " ".repeat(left), self.icon, " ".repeat(right))
            }
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.text().chars().count()
    }
}

/// Draws `spec` at (`x`, `y`), clipped to the frame. Returns the drawn area.
pub fn draw_badge(frame: &mut RenderFrame, x: usize, y: usize, spec: &BadgeSpec) -> Rect {
    draw_badge_clipped(frame, x, y, spec, usize::MAX)
}

/// Like [`draw_badge`], but writes at most `max_width` cells.
pub fn draw_badge_clipped(
    frame: &mut RenderFrame,
    x: usize,
    y: usize,
    spec: &BadgeSpec,
    max_width: usize,
) -> Rect {
    let bg = frame.color_for_token(spec.token);
    let fg = match spec.token {
        StyleToken::Surface | StyleToken::Muted | StyleToken::Background => {
            frame.color_for_token(StyleToken::Foreground)
        }
        _ => frame.color_for_token(StyleToken::Background),
    };
    let style = CellStyle {
        bold: spec.size == BadgeSize::Lg,
        ..CellStyle::plain(fg, bg)
    };
    let text: String = spec.text().chars().take(max_width).collect();
    let written = frame.draw_with_style(x, y, &text, style);
    Rect::new(x, y, written, usize::from(written > 0))
}
