//! Hover/focus tooltip trigger and overlay.

use crate::render::{CellStyle, Rect, RenderFrame};
use crate::style::StyleToken;
use crate::widgets::BorderStyle;

/// Interaction state of one tooltip anchor.
///
/// The tooltip shows while the pointer is over the anchor or the anchor has
/// keyboard focus, and hides once both are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipTrigger {
    hovered: bool,
    focused: bool,
}

impl TooltipTrigger {
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Updates hover from a pointer position and the anchor's last drawn area.
    pub fn track_pointer(&mut self, anchor: Rect, x: usize, y: usize) {
        self.hovered = anchor.contains(x, y);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.hovered || self.focused
    }
}

/// Draws a one-line bordered tooltip below `anchor`, or above it when the
/// frame has no room below. Returns the overlay area (empty if it cannot fit).
pub fn draw_tooltip(frame: &mut RenderFrame, anchor: Rect, text: &str) -> Rect {
    let size = frame.size();
    let width = (text.chars().count() + 4).min(size.width);
    let height = 3;
    if width < 5 || size.height < height {
        return Rect::default();
    }

    let y = if anchor.bottom() + height <= size.height {
        anchor.bottom()
    } else if anchor.y >= height {
        anchor.y - height
    } else {
        return Rect::default();
    };
    let x = anchor.x.min(size.width - width);
    let rect = Rect::new(x, y, width, height);

    let surface = frame.color_for_token(StyleToken::Surface);
    let border = frame.color_for_token(StyleToken::Muted);
    let inner = frame.draw_panel(rect, "", BorderStyle::Plain, border, surface);
    let visible: String = text.chars().take(inner.width.saturating_sub(2)).collect();
    frame.draw_with_style(
        inner.x + 1,
        inner.y,
        &visible,
        CellStyle::plain(frame.color_for_token(StyleToken::Foreground), surface),
    );
    rect
}
