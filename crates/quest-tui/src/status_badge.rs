//! Stateless badge presentation of one quest status.
//!
//! A [`StatusBadge`] resolves its descriptor from the registry it is given
//! and describes the result as a [`BadgeView`]. Nothing is cached between
//! calls, so rendering the same inputs twice produces the same cells.
//!
//! A missing status (`None`) renders nothing. A status that the registry does
//! not know is treated the same way and logged at `warn`, since it means the
//! registry handed to the badge is not total over the keys in use.

use quest_core::{StatusKey, StatusRegistry};
use quest_ftui_adapter::badge::{draw_badge, BadgeShape, BadgeSize, BadgeSpec};
use quest_ftui_adapter::render::{Rect, RenderFrame};
use quest_ftui_adapter::style::StyleToken;
use quest_ftui_adapter::tooltip::{draw_tooltip, TooltipTrigger};

use crate::theme::variant_token;

/// Condensed glyph width below the large breakpoint.
pub const GLYPH_WIDTH: usize = 3;
/// Condensed glyph width at or above the large breakpoint.
pub const GLYPH_WIDTH_LG: usize = 5;

/// Resolved presentation of a badge for one viewport width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeView {
    Hidden,
    Badge(BadgeSpec),
    /// Condensed badge whose label is only reachable through the tooltip.
    WithTooltip {
        badge: BadgeSpec,
        tooltip: String,
    },
}

impl BadgeView {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    #[must_use]
    pub fn badge(&self) -> Option<&BadgeSpec> {
        match self {
            Self::Hidden => None,
            Self::Badge(badge) | Self::WithTooltip { badge, .. } => Some(badge),
        }
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Self::WithTooltip { tooltip, .. } => Some(tooltip),
            Self::Hidden | Self::Badge(_) => None,
        }
    }

    /// Cells the badge occupies; zero when hidden.
    #[must_use]
    pub fn width(&self) -> usize {
        self.badge().map_or(0, BadgeSpec::width)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatusBadge<'r, S> {
    registry: &'r StatusRegistry<S>,
    status: Option<S>,
    condensed: bool,
    size: BadgeSize,
    token: Option<StyleToken>,
    lg_breakpoint: u16,
}

impl<'r, S: StatusKey> StatusBadge<'r, S> {
    #[must_use]
    pub fn new(registry: &'r StatusRegistry<S>, status: Option<S>) -> Self {
        Self {
            registry,
            status,
            condensed: false,
            size: BadgeSize::default(),
            token: None,
            lg_breakpoint: quest_core::config::DEFAULT_LG_BREAKPOINT,
        }
    }

    #[must_use]
    pub fn condensed(mut self, condensed: bool) -> Self {
        self.condensed = condensed;
        self
    }

    #[must_use]
    pub fn size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    /// Paints the badge with `token` instead of the variant's token.
    #[must_use]
    pub fn token_override(mut self, token: StyleToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Viewport width at which condensed glyphs grow to [`GLYPH_WIDTH_LG`].
    #[must_use]
    pub fn breakpoint(mut self, lg_breakpoint: u16) -> Self {
        self.lg_breakpoint = lg_breakpoint;
        self
    }

    #[must_use]
    pub fn status(&self) -> Option<S> {
        self.status
    }

    #[must_use]
    pub fn view(&self, viewport_width: usize) -> BadgeView {
        let Some(status) = self.status else {
            return BadgeView::Hidden;
        };
        let Some(descriptor) = self.registry.get(status) else {
            tracing::warn!(
                status = status.slug(),
                "status has no registry descriptor, badge hidden"
            );
            return BadgeView::Hidden;
        };

        let token = self
            .token
            .unwrap_or_else(|| variant_token(descriptor.variant));
        if self.condensed {
            let width = if viewport_width >= usize::from(self.lg_breakpoint) {
                GLYPH_WIDTH_LG
            } else {
                GLYPH_WIDTH
            };
            return BadgeView::WithTooltip {
                badge: BadgeSpec {
                    icon: descriptor.icon,
                    label: None,
                    token,
                    size: self.size,
                    shape: BadgeShape::Glyph { width },
                },
                tooltip: descriptor.label.clone(),
            };
        }

        let trailing_pad = match self.size {
            BadgeSize::Lg => 2,
            BadgeSize::Sm | BadgeSize::Md => 1,
        };
        BadgeView::Badge(BadgeSpec {
            icon: descriptor.icon,
            label: Some(descriptor.label.clone()),
            token,
            size: self.size,
            shape: BadgeShape::Pill { trailing_pad },
        })
    }

    /// Draws the badge at (`x`, `y`) and, when condensed and `tooltip` is
    /// visible, its label overlay. Returns the badge area, `None` if hidden.
    pub fn render(
        &self,
        frame: &mut RenderFrame,
        x: usize,
        y: usize,
        tooltip: &TooltipTrigger,
    ) -> Option<Rect> {
        match self.view(frame.size().width) {
            BadgeView::Hidden => None,
            BadgeView::Badge(badge) => Some(draw_badge(frame, x, y, &badge)),
            BadgeView::WithTooltip { badge, tooltip: text } => {
                let area = draw_badge(frame, x, y, &badge);
                if tooltip.is_visible() && !area.is_empty() {
                    draw_tooltip(frame, area, &text);
                }
                Some(area)
            }
        }
    }
}
