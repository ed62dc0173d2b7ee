//! Dropdown control that changes a quest's status.
//!
//! The control keeps a local single-key [`SelectionSet`] seeded from the
//! caller's status. The adapter [`Menu`] proposes set changes; this module is
//! the only place that turns such a set back into one status value, calls the
//! owner's callback, and then commits the set locally so the trigger shows the
//! pick right away.
//!
//! The local set is a cache of the last user intent. When persisting a change
//! fails, the owner corrects the display by calling [`StatusSelect::set_status`]
//! with the authoritative value; the control never reverts on its own.

use quest_core::{StatusKey, StatusRegistry};
use quest_ftui_adapter::badge::{draw_badge_clipped, BadgeSize};
use quest_ftui_adapter::input::{translate_input, InputEvent, MouseEvent, UiAction};
use quest_ftui_adapter::menu::{Menu, MenuEvent, MenuItem, MenuSection, Placement, MARK_COLUMNS};
use quest_ftui_adapter::render::{CellStyle, Rect, RenderFrame};
use quest_ftui_adapter::selection::{SelectionPolicy, SelectionSet};
use quest_ftui_adapter::style::StyleToken;
use quest_ftui_adapter::tooltip::TooltipTrigger;

use crate::status_badge::StatusBadge;

pub const MENU_TITLE: &str = "Status";
const CHEVRON_CLOSED: char = '▾';
const CHEVRON_OPEN: char = '▴';
/// Blank cell plus chevron after the trigger badge.
const CHEVRON_COLUMNS: usize = 2;

pub struct StatusSelect<'r, S, F> {
    registry: &'r StatusRegistry<S>,
    status: S,
    is_core: bool,
    on_change: F,
    selection: SelectionSet<S>,
    menu: Menu<S>,
    focused: bool,
    trigger_area: Rect,
    panel_area: Option<Rect>,
}

impl<'r, S, F> StatusSelect<'r, S, F>
where
    S: StatusKey,
    F: FnMut(S),
{
    pub fn new(registry: &'r StatusRegistry<S>, status: S, is_core: bool, on_change: F) -> Self {
        let mut select = Self {
            registry,
            status,
            is_core,
            on_change,
            selection: SelectionSet::single(status),
            menu: Menu::new(SelectionPolicy::single_required(), Placement::BottomEnd),
            focused: false,
            trigger_area: Rect::default(),
            panel_area: None,
        };
        select.refresh_candidates();
        select
    }

    /// Status shown on the trigger: the last pick, or the seeded status.
    #[must_use]
    pub fn status(&self) -> S {
        self.selection.only().unwrap_or(self.status)
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet<S> {
        &self.selection
    }

    #[must_use]
    pub fn is_core(&self) -> bool {
        self.is_core
    }

    pub fn set_is_core(&mut self, is_core: bool) {
        if self.is_core != is_core {
            self.is_core = is_core;
            self.refresh_candidates();
        }
    }

    /// Takes `status` from the owner as authoritative and reseeds the local
    /// selection with it, discarding any unconfirmed pick.
    pub fn set_status(&mut self, status: S) {
        if self.selection.only() != Some(status) {
            tracing::debug!(status = status.slug(), "status select reseeded by owner");
        }
        self.status = status;
        self.selection = SelectionSet::single(status);
    }

    /// Statuses the menu offers, in registry order.
    #[must_use]
    pub fn candidates(&self) -> Vec<S> {
        self.menu.section().items.iter().map(|item| item.id).collect()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn open(&mut self) {
        self.refresh_candidates();
        self.menu.open(&self.selection);
        tracing::debug!(
            status = self.status().slug(),
            candidates = self.menu.section().items.len(),
            "status menu opened"
        );
    }

    pub fn close(&mut self) {
        if self.menu.is_open() {
            self.menu.close();
            tracing::debug!("status menu closed");
        }
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns true when the action changed anything visible.
    pub fn handle_action(&mut self, action: UiAction) -> bool {
        if !self.menu.is_open() && matches!(action, UiAction::Confirm | UiAction::MoveDown) {
            self.open();
            return true;
        }
        let event = self.menu.handle_action(action, &self.selection);
        self.apply(event)
    }

    /// Keyboard input goes through the adapter keymap; mouse presses hit-test
    /// the trigger and the menu rows from the last render.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Mouse(MouseEvent {
                column,
                row,
                pressed: true,
                wheel: None,
            }) => self.handle_click(*column, *row),
            InputEvent::Mouse(MouseEvent { wheel: None, .. }) => false,
            _ => self.handle_action(translate_input(event)),
        }
    }

    /// Picks `status` as if its menu row were activated. Statuses that are
    /// not candidates are ignored.
    pub fn select(&mut self, status: S) -> bool {
        let event = self.menu.activate(status, &self.selection);
        self.apply(event)
    }

    /// Narrows a widget selection event to one status. Calls the owner's
    /// callback first and commits the set after it returns. Sets that do not
    /// hold exactly one key are dropped.
    pub fn handle_selection_change(&mut self, next: SelectionSet<S>) -> Option<S> {
        let Some(status) = next.only() else {
            tracing::warn!(
                keys = next.len(),
                "ignoring status selection that is not a single key"
            );
            return None;
        };
        tracing::debug!(
            from = self.status().slug(),
            to = status.slug(),
            "status selected"
        );
        (self.on_change)(status);
        self.selection = next;
        Some(status)
    }

    /// Draws the trigger at (`x`, `y`) and the menu overlay when open.
    /// Returns the trigger area.
    pub fn render(&mut self, frame: &mut RenderFrame, x: usize, y: usize) -> Rect {
        let idle = TooltipTrigger::default();
        let face = StatusBadge::new(self.registry, self.selection.only()).size(BadgeSize::Lg);
        let badge_width = face
            .render(frame, x, y, &idle)
            .map_or(0, |area| area.width);

        let chevron = if self.menu.is_open() {
            CHEVRON_OPEN
        } else {
            CHEVRON_CLOSED
        };
        let token = if self.focused {
            StyleToken::Focus
        } else {
            StyleToken::Muted
        };
        let style = CellStyle {
            underline: self.focused,
            ..CellStyle::plain(
                frame.color_for_token(token),
                frame.color_for_token(StyleToken::Background),
            )
        };
        let chevron_text = format!("{chevron:>CHEVRON_COLUMNS$}");
        let chevron_width = frame.draw_with_style(x + badge_width, y, &chevron_text, style);
        self.trigger_area = Rect::new(x, y, badge_width + chevron_width, 1);

        self.panel_area = None;
        if self.menu.is_open() {
            self.draw_menu(frame);
        }
        self.trigger_area
    }

    fn draw_menu(&mut self, frame: &mut RenderFrame) {
        let content_width = self
            .menu
            .section()
            .items
            .iter()
            .map(|item| self.row_badge(item.id).view(frame.size().width).width())
            .max()
            .unwrap_or(0);
        let width = (content_width + 1 + MARK_COLUMNS + 2).max(MENU_TITLE.chars().count() + 4);
        let panel = self.menu.panel_rect(self.trigger_area, width, frame.size());
        if panel.is_empty() {
            return;
        }
        let viewport = frame.size().width;
        for (status, row) in self.menu.draw(frame, panel, &self.selection) {
            if let Some(badge) = self.row_badge(status).view(viewport).badge() {
                draw_badge_clipped(frame, row.x, row.y, badge, row.width);
            }
        }
        self.panel_area = Some(panel);
    }

    fn row_badge(&self, status: S) -> StatusBadge<'r, S> {
        StatusBadge::new(self.registry, Some(status)).size(BadgeSize::Lg)
    }

    fn handle_click(&mut self, x: usize, y: usize) -> bool {
        if !self.menu.is_open() {
            if self.trigger_area.contains(x, y) {
                self.open();
                return true;
            }
            return false;
        }
        if let Some(panel) = self.panel_area {
            if let Some(index) = self.menu.row_at(panel, x, y) {
                let status = self.menu.section().items.get(index).map(|item| item.id);
                return status.is_some_and(|status| self.select(status));
            }
            if panel.contains(x, y) {
                return false;
            }
        }
        // Any press outside the open panel dismisses it, the trigger included.
        self.close();
        true
    }

    fn apply(&mut self, event: MenuEvent<S>) -> bool {
        match event {
            MenuEvent::Ignored => false,
            MenuEvent::Opened => {
                tracing::debug!("status menu opened");
                true
            }
            MenuEvent::Closed => {
                tracing::debug!("status menu closed");
                true
            }
            MenuEvent::FocusMoved(_) => true,
            MenuEvent::SelectionChanged(next) => {
                self.handle_selection_change(next);
                true
            }
        }
    }

    fn refresh_candidates(&mut self) {
        let items = self
            .registry
            .candidates(self.is_core)
            .into_iter()
            .map(|status| MenuItem {
                id: status,
                aria_label: self
                    .registry
                    .get(status)
                    .map_or_else(|| status.slug().to_owned(), |d| d.label.clone()),
            })
            .collect();
        self.menu.set_section(MenuSection::new(MENU_TITLE, items));
    }
}
