//! Dropdown menu widget with controlled selection.
//!
//! The menu owns only its open/closed state and row focus. The owner keeps
//! the selected keys and passes them in; activation reports the proposed
//! next selection as [`MenuEvent::SelectionChanged`] and the owner decides
//! whether to commit it.

use crate::input::UiAction;
use crate::render::{CellStyle, FrameCell, FrameSize, Rect, RenderFrame};
use crate::selection::{SelectionPolicy, SelectionSet};
use crate::style::StyleToken;
use crate::widgets::BorderStyle;

/// Width reserved at the end of each row for the selection mark and padding.
pub const MARK_COLUMNS: usize = 2;
const SELECTED_MARK: char = '✓';
const SCROLL_UP: char = '▲';
const SCROLL_DOWN: char = '▼';

/// Overlay position relative to the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    BottomStart,
    #[default]
    BottomEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<K> {
    pub id: K,
    /// Accessible name announced for the row.
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection<K> {
    pub title: String,
    pub items: Vec<MenuItem<K>>,
}

impl<K> MenuSection<K> {
    #[must_use]
    pub fn new(title: &str, items: Vec<MenuItem<K>>) -> Self {
        Self {
            title: title.to_owned(),
            items,
        }
    }
}

/// Outcome of feeding an interaction to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent<K> {
    Ignored,
    Opened,
    Closed,
    FocusMoved(usize),
    /// The user picked a row and the policy produced a different selection.
    SelectionChanged(SelectionSet<K>),
}

#[derive(Debug, Clone)]
pub struct Menu<K> {
    section: MenuSection<K>,
    policy: SelectionPolicy,
    placement: Placement,
    open: bool,
    focused: usize,
}

impl<K: Copy + PartialEq> Menu<K> {
    #[must_use]
    pub fn new(policy: SelectionPolicy, placement: Placement) -> Self {
        Self {
            section: MenuSection::new("", Vec::new()),
            policy,
            placement,
            open: false,
            focused: 0,
        }
    }

    /// Replaces the rows, keeping focus within range.
    pub fn set_section(&mut self, section: MenuSection<K>) {
        self.section = section;
        self.focused = self.focused.min(self.section.items.len().saturating_sub(1));
    }

    #[must_use]
    pub fn section(&self) -> &MenuSection<K> {
        &self.section
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the menu with focus on the first selected row (or the first row).
    pub fn open(&mut self, selected: &SelectionSet<K>) {
        self.open = true;
        self.focused = self
            .section
            .items
            .iter()
            .position(|item| selected.contains(item.id))
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        if self.section.items.is_empty() {
            return None;
        }
        Some(self.focused)
    }

    #[must_use]
    pub fn focused_key(&self) -> Option<K> {
        self.section.items.get(self.focused).map(|item| item.id)
    }

    pub fn focus_next(&mut self) -> Option<usize> {
        let len = self.section.items.len();
        if len == 0 {
            return None;
        }
        self.focused = (self.focused + 1) % len;
        Some(self.focused)
    }

    pub fn focus_prev(&mut self) -> Option<usize> {
        let len = self.section.items.len();
        if len == 0 {
            return None;
        }
        self.focused = (self.focused + len - 1) % len;
        Some(self.focused)
    }

    /// Activates the row for `key` and closes the menu.
    pub fn activate(&mut self, key: K, selected: &SelectionSet<K>) -> MenuEvent<K> {
        let Some(index) = self.section.items.iter().position(|item| item.id == key) else {
            return MenuEvent::Ignored;
        };
        self.focused = index;
        self.open = false;
        match self.policy.next_selection(selected, key) {
            Some(next) => MenuEvent::SelectionChanged(next),
            None => MenuEvent::Closed,
        }
    }

    pub fn activate_focused(&mut self, selected: &SelectionSet<K>) -> MenuEvent<K> {
        match self.focused_key() {
            Some(key) => self.activate(key, selected),
            None => {
                self.open = false;
                MenuEvent::Closed
            }
        }
    }

    /// Keyboard handling for both the trigger (closed) and the list (open).
    pub fn handle_action(&mut self, action: UiAction, selected: &SelectionSet<K>) -> MenuEvent<K> {
        if !self.open {
            return match action {
                UiAction::Confirm | UiAction::MoveDown => {
                    self.open(selected);
                    MenuEvent::Opened
                }
                _ => MenuEvent::Ignored,
            };
        }
        match action {
            UiAction::MoveUp | UiAction::ScrollUp | UiAction::FocusPrev => self
                .focus_prev()
                .map_or(MenuEvent::Ignored, MenuEvent::FocusMoved),
            UiAction::MoveDown | UiAction::ScrollDown | UiAction::FocusNext => self
                .focus_next()
                .map_or(MenuEvent::Ignored, MenuEvent::FocusMoved),
            UiAction::Confirm => self.activate_focused(selected),
            UiAction::Cancel => {
                self.close();
                MenuEvent::Closed
            }
            _ => MenuEvent::Ignored,
        }
    }

    /// Overlay rectangle for a panel of `width` cells anchored to `anchor`.
    ///
    /// The panel opens below the anchor, or above it when the rows do not fit
    /// below and there is more room above. It always shows at least one row so
    /// an empty section is still visible.
    #[must_use]
    pub fn panel_rect(&self, anchor: Rect, width: usize, frame: FrameSize) -> Rect {
        let width = width.min(frame.width);
        let needed = self.section.items.len().max(1) + 2;
        let below = frame.height.saturating_sub(anchor.bottom());
        let above = anchor.y.min(frame.height);
        let (y, height) = if needed > below && above > below {
            let height = needed.min(above);
            (anchor.y - height, height)
        } else {
            (anchor.bottom(), needed.min(below))
        };
        let preferred_x = match self.placement {
            Placement::BottomStart => anchor.x,
            Placement::BottomEnd => anchor.right().saturating_sub(width),
        };
        let x = preferred_x.min(frame.width.saturating_sub(width));
        Rect::new(x, y, width, height)
    }

    /// First row drawn when only `visible` rows fit. Scrolls just far enough
    /// to keep the focused row in view.
    #[must_use]
    pub fn first_visible_row(&self, visible: usize) -> usize {
        if visible == 0 {
            return 0;
        }
        let last_page = self.section.items.len().saturating_sub(visible);
        self.focused.saturating_sub(visible - 1).min(last_page)
    }

    /// Index of the row under (`x`, `y`) inside a panel returned by [`Menu::panel_rect`].
    #[must_use]
    pub fn row_at(&self, panel: Rect, x: usize, y: usize) -> Option<usize> {
        let inner = panel.inner();
        if !inner.contains(x, y) {
            return None;
        }
        let index = self.first_visible_row(inner.height) + (y - inner.y);
        (index < self.section.items.len()).then_some(index)
    }

    /// Draws the panel chrome, row highlights, and selection marks.
    ///
    /// Returns the content rectangle of each visible row so the owner can draw
    /// the row body. Rows scrolled out of view are marked with arrows on the
    /// border.
    pub fn draw(
        &self,
        frame: &mut RenderFrame,
        panel: Rect,
        selected: &SelectionSet<K>,
    ) -> Vec<(K, Rect)> {
        let surface = frame.color_for_token(StyleToken::Surface);
        let border = frame.color_for_token(StyleToken::Muted);
        let inner = frame.draw_panel(panel, &self.section.title, BorderStyle::Rounded, border, surface);
        if inner.is_empty() {
            return Vec::new();
        }

        let highlight = frame.color_for_token(StyleToken::Focus);
        let mark_fg = frame.color_for_token(StyleToken::Success);
        let first = self.first_visible_row(inner.height);
        let hidden_below = self.section.items.len() > first + inner.height;
        let hint_x = panel.right().saturating_sub(2);
        let hint_style = CellStyle::plain(border, surface);
        if first > 0 {
            frame.set_cell(
                hint_x,
                panel.y,
                FrameCell {
                    glyph: SCROLL_UP,
                    style: hint_style,
                },
            );
        }
        if hidden_below {
            frame.set_cell(
                hint_x,
                panel.bottom() - 1,
                FrameCell {
                    glyph: SCROLL_DOWN,
                    style: hint_style,
                },
            );
        }

        let mut rows = Vec::new();
        for (index, item) in self
            .section
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(inner.height)
        {
            let y = inner.y + index - first;
            let row = Rect::new(inner.x, y, inner.width, 1);
            if self.focused == index {
                // Focus bar in the left gutter.
                frame.set_cell(
                    row.x,
                    y,
                    FrameCell {
                        glyph: '▌',
                        style: CellStyle::plain(highlight, surface),
                    },
                );
            }
            if selected.contains(item.id) && row.width >= MARK_COLUMNS {
                frame.set_cell(
                    row.right() - MARK_COLUMNS,
                    y,
                    FrameCell {
                        glyph: SELECTED_MARK,
                        style: CellStyle {
                            bold: true,
                            ..CellStyle::plain(mark_fg, surface)
                        },
                    },
                );
            }
            let content = Rect::new(
                row.x + 1,
                y,
                row.width.saturating_sub(1 + MARK_COLUMNS),
                1,
            );
            rows.push((item.id, content));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::{Menu, MenuEvent, MenuItem, MenuSection, Placement};
    use crate::input::UiAction;
    use crate::render::{FrameSize, Rect, RenderFrame};
    use crate::selection::{SelectionPolicy, SelectionSet};
    use crate::style::ThemeSpec;

    fn letters_menu(keys: &[char]) -> Menu<char> {
        let mut menu = Menu::new(SelectionPolicy::single_required(), Placement::BottomEnd);
        menu.set_section(MenuSection::new(
            "Letters",
            keys.iter()
                .map(|key| MenuItem {
                    id: *key,
                    aria_label: key.to_string(),
                })
                .collect(),
        ));
        menu
    }

    #[test]
    fn opening_focuses_selected_row() {
        let mut menu = letters_menu(&['a', 'b', 'c']);
        menu.open(&SelectionSet::single('b'));
        assert!(menu.is_open());
        assert_eq!(menu.focused_key(), Some('b'));
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut menu = letters_menu(&['a', 'b']);
        menu.open(&SelectionSet::single('a'));
        assert_eq!(menu.focus_prev(), Some(1));
        assert_eq!(menu.focus_next(), Some(0));
    }

    #[test]
    fn activating_new_key_reports_change_and_closes() {
        let mut menu = letters_menu(&['a', 'b']);
        let selected = SelectionSet::single('a');
        menu.open(&selected);
        let event = menu.activate('b', &selected);
        assert_eq!(event, MenuEvent::SelectionChanged(SelectionSet::single('b')));
        assert!(!menu.is_open());
    }

    #[test]
    fn activating_selected_key_only_closes() {
        let mut menu = letters_menu(&['a', 'b']);
        let selected = SelectionSet::single('a');
        menu.open(&selected);
        assert_eq!(menu.activate('a', &selected), MenuEvent::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn activating_unknown_key_is_ignored() {
        let mut menu = letters_menu(&['a']);
        let selected = SelectionSet::single('a');
        menu.open(&selected);
        assert_eq!(menu.activate('z', &selected), MenuEvent::Ignored);
        assert!(menu.is_open());
    }

    #[test]
    fn keyboard_flow_open_move_confirm() {
        let mut menu = letters_menu(&['a', 'b', 'c']);
        let selected = SelectionSet::single('a');
        assert_eq!(menu.handle_action(UiAction::MoveUp, &selected), MenuEvent::Ignored);
        assert_eq!(menu.handle_action(UiAction::Confirm, &selected), MenuEvent::Opened);
        assert_eq!(
            menu.handle_action(UiAction::MoveDown, &selected),
            MenuEvent::FocusMoved(1)
        );
        assert_eq!(
            menu.handle_action(UiAction::Confirm, &selected),
            MenuEvent::SelectionChanged(SelectionSet::single('b'))
        );
    }

    #[test]
    fn cancel_closes_without_selection() {
        let mut menu = letters_menu(&['a', 'b']);
        let selected = SelectionSet::single('a');
        menu.open(&selected);
        assert_eq!(menu.handle_action(UiAction::Cancel, &selected), MenuEvent::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn empty_section_still_opens() {
        let mut menu = letters_menu(&[]);
        let selected = SelectionSet::single('a');
        assert_eq!(menu.handle_action(UiAction::Confirm, &selected), MenuEvent::Opened);
        assert_eq!(menu.focused_index(), None);
        assert_eq!(menu.handle_action(UiAction::MoveDown, &selected), MenuEvent::Ignored);
        let panel = menu.panel_rect(
            Rect::new(0, 0, 10, 1),
            10,
            FrameSize {
                width: 20,
                height: 10,
            },
        );
        assert_eq!(panel.height, 3);
    }

    #[test]
    fn panel_aligns_to_trigger_end_and_stays_in_frame() {
        let menu = letters_menu(&['a', 'b']);
        let size = FrameSize {
            width: 30,
            height: 10,
        };
        assert_eq!(
            menu.panel_rect(Rect::new(10, 0, 12, 1), 8, size),
            Rect::new(14, 1, 8, 4)
        );
        assert_eq!(
            menu.panel_rect(Rect::new(0, 0, 4, 1), 8, size),
            Rect::new(0, 1, 8, 4)
        );
        assert_eq!(
            menu.panel_rect(Rect::new(26, 0, 4, 1), 8, size).right(),
            30
        );
    }

    #[test]
    fn row_hit_testing_uses_inner_area() {
        let menu = letters_menu(&['a', 'b']);
        let panel = Rect::new(0, 1, 8, 4);
        assert_eq!(menu.row_at(panel, 3, 2), Some(0));
        assert_eq!(menu.row_at(panel, 3, 3), Some(1));
        assert_eq!(menu.row_at(panel, 3, 1), None);
        assert_eq!(menu.row_at(panel, 0, 2), None);
    }

    #[test]
    fn draw_marks_selected_and_focused_rows() {
        let mut menu = letters_menu(&['a', 'b']);
        let selected = SelectionSet::single('b');
        menu.open(&selected);
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 10,
                height: 4,
            },
            ThemeSpec::default(),
        );
        let rows = menu.draw(&mut frame, Rect::new(0, 0, 10, 4), &selected);
        assert_eq!(
            rows,
            vec![('a', Rect::new(2, 1, 5, 1)), ('b', Rect::new(2, 2, 5, 1))]
        );
        assert_eq!(frame.row_text(1), "│        │");
        assert_eq!(frame.row_text(2), "│▌     ✓ │");
    }

    #[test]
    fn panel_flips_above_when_short_below() {
        let menu = letters_menu(&['a', 'b', 'c']);
        let size = FrameSize {
            width: 20,
            height: 10,
        };
        assert_eq!(
            menu.panel_rect(Rect::new(0, 8, 6, 1), 8, size),
            Rect::new(0, 3, 8, 5)
        );
        assert_eq!(
            menu.panel_rect(Rect::new(0, 1, 6, 1), 8, size),
            Rect::new(0, 2, 8, 5)
        );
    }

    #[test]
    fn short_panel_scrolls_focused_row_into_view() {
        let mut menu = letters_menu(&['a', 'b', 'c', 'd', 'e']);
        let selected = SelectionSet::single('a');
        menu.open(&selected);
        assert_eq!(menu.first_visible_row(2), 0);
        menu.focus_next();
        menu.focus_next();
        menu.focus_next();
        assert_eq!(menu.first_visible_row(2), 2);
        assert_eq!(menu.first_visible_row(10), 0);

        let panel = Rect::new(0, 0, 10, 4);
        assert_eq!(menu.row_at(panel, 3, 1), Some(2));
        assert_eq!(menu.row_at(panel, 3, 2), Some(3));

        let mut frame = RenderFrame::new(
            FrameSize {
                width: 10,
                height: 4,
            },
            ThemeSpec::default(),
        );
        let rows = menu.draw(&mut frame, panel, &selected);
        assert_eq!(
            rows,
            vec![('c', Rect::new(2, 1, 5, 1)), ('d', Rect::new(2, 2, 5, 1))]
        );
        assert_eq!(frame.row_text(0).chars().nth(8), Some('▲'));
        assert_eq!(frame.row_text(2).chars().nth(1), Some('▌'));
        assert_eq!(frame.row_text(3).chars().nth(8), Some('▼'));
    }
}
