//! Quest status screen: one status control plus a legend of every status.

use std::sync::mpsc::{self, Receiver};

use quest_core::config::TuiConfig;
use quest_core::{Status, StatusKey, StatusRegistry};
use quest_ftui_adapter::input::{translate_input, InputEvent, Key, KeyEvent, UiAction};
use quest_ftui_adapter::render::{FrameSize, Rect, RenderFrame, TextRole};
use quest_ftui_adapter::style::ThemeSpec;
use quest_ftui_adapter::tooltip::TooltipTrigger;

use crate::status_badge::StatusBadge;
use crate::status_select::StatusSelect;

const CONTENT_X: usize = 2;
const FIELD_X: usize = 11;
const SELECT_ROW: usize = 4;
const LEGEND_ROW: usize = 13;
const HELP_TEXT: &str = "tab focus  enter open  c core  q quit";

/// Callback the screen hands to its status control.
pub type ChangeCallback = Box<dyn FnMut(Status)>;

/// The quest whose status the screen edits. Stands in for the owner's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRecord {
    pub title: String,
    pub status: Status,
    pub is_core: bool,
}

impl QuestRecord {
    #[must_use]
    pub fn demo(is_core: bool) -> Self {
        Self {
            title: "Chart the sunken archive".to_owned(),
            status: Status::InProgress,
            is_core,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub condensed: bool,
    pub lg_breakpoint: u16,
}

impl ScreenOptions {
    #[must_use]
    pub fn from_config(config: &TuiConfig) -> Self {
        Self {
            condensed: config.condensed,
            lg_breakpoint: config.lg_breakpoint,
        }
    }
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self::from_config(&TuiConfig::default())
    }
}

/// What the runtime should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Redraw,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Select,
    Legend(usize),
}

pub struct QuestStatusScreen<'r> {
    registry: &'r StatusRegistry<Status>,
    quest: QuestRecord,
    options: ScreenOptions,
    theme: ThemeSpec,
    size: FrameSize,
    select: StatusSelect<'r, Status, ChangeCallback>,
    changes: Receiver<Status>,
    history: Vec<String>,
    focus: Focus,
    legend: Vec<(Status, TooltipTrigger, Rect)>,
    quitting: bool,
}

impl<'r> QuestStatusScreen<'r> {
    #[must_use]
    pub fn new(
        registry: &'r StatusRegistry<Status>,
        quest: QuestRecord,
        options: ScreenOptions,
        theme: ThemeSpec,
        size: FrameSize,
    ) -> Self {
        let (sender, changes) = mpsc::channel();
        let on_change: ChangeCallback = Box::new(move |status| {
            // The receiver lives as long as the screen that owns this callback.
            let _ = sender.send(status);
        });
        let mut select = StatusSelect::new(registry, quest.status, quest.is_core, on_change);
        select.set_focused(true);
        let legend = registry
            .keys()
            .map(|status| (status, TooltipTrigger::default(), Rect::default()))
            .collect();
        Self {
            registry,
            quest,
            options,
            theme,
            size,
            select,
            changes,
            history: Vec::new(),
            focus: Focus::Select,
            legend,
            quitting: false,
        }
    }

    #[must_use]
    pub fn quest(&self) -> &QuestRecord {
        &self.quest
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn select(&self) -> &StatusSelect<'r, Status, ChangeCallback> {
        &self.select
    }

    #[must_use]
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    /// Legend entry currently holding keyboard focus.
    #[must_use]
    pub fn focused_legend(&self) -> Option<Status> {
        match self.focus {
            Focus::Select => None,
            Focus::Legend(index) => self.legend.get(index).map(|(status, _, _)| *status),
        }
    }

    pub fn update(&mut self, event: InputEvent) -> Command {
        let command = self.dispatch(event);
        self.drain_changes();
        command
    }

    fn dispatch(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::Resize(resize) => {
                self.size = FrameSize {
                    width: resize.width,
                    height: resize.height,
                };
                Command::Redraw
            }
            InputEvent::Tick => Command::None,
            InputEvent::Mouse(mouse) => {
                for (_, trigger, area) in &mut self.legend {
                    trigger.track_pointer(*area, mouse.column, mouse.row);
                }
                self.select.handle_input(&event);
                Command::Redraw
            }
            InputEvent::Key(key) => self.handle_key(key, &event),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, event: &InputEvent) -> Command {
        let action = translate_input(event);
        if action == UiAction::Quit && (key.modifiers.ctrl || !self.select.is_open()) {
            self.quitting = true;
            return Command::Quit;
        }
        if self.select.is_open() {
            return redraw_if(self.select.handle_action(action));
        }
        if key.key == Key::Char('c') && !key.modifiers.ctrl {
            self.toggle_core();
            return Command::Redraw;
        }
        match action {
            UiAction::FocusNext | UiAction::MoveRight => {
                self.move_focus(1);
                Command::Redraw
            }
            UiAction::FocusPrev | UiAction::MoveLeft => {
                self.move_focus(-1);
                Command::Redraw
            }
            UiAction::Cancel => {
                self.set_focus(Focus::Select);
                Command::Redraw
            }
            UiAction::Refresh => Command::Redraw,
            _ if self.focus == Focus::Select => redraw_if(self.select.handle_action(action)),
            _ => Command::None,
        }
    }

    fn toggle_core(&mut self) {
        self.quest.is_core = !self.quest.is_core;
        self.select.set_is_core(self.quest.is_core);
        tracing::info!(is_core = self.quest.is_core, "quest core flag toggled");
    }

    fn move_focus(&mut self, delta: isize) {
        // Select sits at slot 0, legend entries follow.
        let slots = self.legend.len() + 1;
        let current = match self.focus {
            Focus::Select => 0,
            Focus::Legend(index) => index + 1,
        };
        let next = (current as isize + delta).rem_euclid(slots as isize) as usize;
        self.set_focus(if next == 0 {
            Focus::Select
        } else {
            Focus::Legend(next - 1)
        });
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.select.set_focused(focus == Focus::Select);
        for (index, (_, trigger, _)) in self.legend.iter_mut().enumerate() {
            if focus == Focus::Legend(index) {
                trigger.focus();
            } else {
                trigger.blur();
            }
        }
    }

    /// Applies the picks the control reported. This screen accepts every
    /// change, then confirms it back to the control.
    fn drain_changes(&mut self) {
        while let Ok(status) = self.changes.try_recv() {
            let previous = self.quest.status;
            self.quest.status = status;
            self.select.set_status(status);
            tracing::info!(
                from = previous.slug(),
                to = status.slug(),
                "quest status changed"
            );
            let label = self
                .registry
                .get(status)
                .map_or_else(|| status.slug().to_owned(), |d| d.label.clone());
            self.history.push(format!("status set to {label}"));
        }
    }

    pub fn render(&mut self) -> RenderFrame {
        let size = FrameSize {
            width: self.size.width.max(1),
            height: self.size.height.max(1),
        };
        let mut frame = RenderFrame::new(size, self.theme);
        if self.quitting {
            return frame;
        }

        frame.draw_text(0, 0, " Quest status", TextRole::Accent);
        if self.quest.is_core {
            let tag = "[core]";
            frame.draw_text(
                size.width.saturating_sub(tag.len() + 1),
                0,
                tag,
                TextRole::Warning,
            );
        }
        frame.draw_text(CONTENT_X, 2, "Quest", TextRole::Muted);
        frame.draw_text(FIELD_X, 2, &self.quest.title, TextRole::Primary);
        frame.draw_text(CONTENT_X, SELECT_ROW, "Status", TextRole::Muted);

        let legend_row = LEGEND_ROW.min(size.height.saturating_sub(3));
        frame.draw_text(CONTENT_X, legend_row, "Legend", TextRole::Muted);
        self.render_legend(&mut frame, legend_row);

        if let Some(message) = self.history.last() {
            frame.draw_text(CONTENT_X, size.height.saturating_sub(2), message, TextRole::Info);
        }
        frame.draw_text(CONTENT_X, size.height.saturating_sub(1), HELP_TEXT, TextRole::Muted);

        // The menu overlays everything above, so the control draws last.
        self.select.render(&mut frame, FIELD_X, SELECT_ROW);
        frame
    }

    fn render_legend(&mut self, frame: &mut RenderFrame, y: usize) {
        let mut x = FIELD_X;
        let mut visible = None;
        for (status, trigger, area) in &mut self.legend {
            let badge = StatusBadge::new(self.registry, Some(*status))
                .condensed(self.options.condensed)
                .breakpoint(self.options.lg_breakpoint);
            let idle = TooltipTrigger::default();
            *area = badge.render(frame, x, y, &idle).unwrap_or_default();
            if trigger.is_visible() {
                visible = Some((badge, *area));
            }
            x = area.right() + 1;
        }
        // Tooltips go on top of the whole row, not just the badges before them.
        if let Some((badge, area)) = visible {
            let mut shown = TooltipTrigger::default();
            shown.focus();
            badge.render(frame, area.x, area.y, &shown);
        }
    }
}

fn redraw_if(changed: bool) -> Command {
    if changed {
        Command::Redraw
    } else {
        Command::None
    }
}

/// Plain text render of the screen for non-interactive output.
#[must_use]
pub fn render_snapshot_text(
    registry: &StatusRegistry<Status>,
    config: &TuiConfig,
    theme: ThemeSpec,
) -> String {
    let mut screen = QuestStatusScreen::new(
        registry,
        QuestRecord::demo(config.is_core),
        ScreenOptions::from_config(config),
        theme,
        FrameSize {
            width: 80,
            height: 18,
        },
    );
    let mut text = screen.render().snapshot();
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::{Command, QuestRecord, QuestStatusScreen, ScreenOptions};
    use quest_core::{builtin_registry, Status};
    use quest_ftui_adapter::input::{
        InputEvent, Key, KeyEvent, Modifiers, MouseEvent, ResizeEvent,
    };
    use quest_ftui_adapter::render::FrameSize;
    use quest_ftui_adapter::snapshot::count_occurrences;
    use quest_ftui_adapter::style::ThemeSpec;

    fn screen(is_core: bool) -> QuestStatusScreen<'static> {
        QuestStatusScreen::new(
            builtin_registry(),
            QuestRecord::demo(is_core),
            ScreenOptions::default(),
            ThemeSpec::default(),
            FrameSize {
                width: 80,
                height: 18,
            },
        )
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(key))
    }

    #[test]
    fn picking_a_status_updates_the_quest_record() {
        let mut screen = screen(false);
        assert_eq!(screen.update(key(Key::Enter)), Command::Redraw);
        assert!(screen.select().is_open());
        screen.update(key(Key::Down));
        screen.update(key(Key::Enter));
        assert_eq!(screen.quest().status, Status::Complete);
        assert_eq!(screen.select().status(), Status::Complete);
        assert_eq!(screen.history(), ["status set to Complete".to_owned()]);
    }

    #[test]
    fn core_toggle_changes_menu_candidates() {
        let mut screen = screen(false);
        assert_eq!(screen.select().candidates().len(), 3);
        screen.update(key(Key::Char('c')));
        assert!(screen.quest().is_core);
        assert_eq!(screen.select().candidates().len(), 5);
        let frame = screen.render();
        assert_eq!(count_occurrences(&frame, "[core]"), 1);
    }

    #[test]
    fn tab_focus_reveals_legend_tooltip() {
        let mut screen = screen(false);
        let before = screen.render();
        assert_eq!(count_occurrences(&before, "Not started"), 0);

        assert!(screen.select().is_focused());
        screen.update(key(Key::Tab));
        assert_eq!(screen.focused_legend(), Some(Status::NotStarted));
        assert!(!screen.select().is_focused());
        let after = screen.render();
        assert_eq!(count_occurrences(&after, "Not started"), 1);

        screen.update(key(Key::Escape));
        assert_eq!(screen.focused_legend(), None);
    }

    #[test]
    fn hovering_a_legend_glyph_shows_its_label() {
        let mut screen = screen(false);
        screen.render();
        // Legend glyphs are three cells wide, one cell apart, starting at column 11.
        screen.update(InputEvent::Mouse(MouseEvent::hover(24, 13)));
        let frame = screen.render();
        assert_eq!(count_occurrences(&frame, "Filed"), 1);
    }

    #[test]
    fn quit_keys_stop_the_screen() {
        let mut screen = screen(false);
        assert_eq!(screen.update(key(Key::Char('q'))), Command::Quit);
        assert!(screen.quitting());

        let mut open = self::screen(false);
        open.update(key(Key::Enter));
        let ctrl_c = InputEvent::Key(KeyEvent {
            key: Key::Char('c'),
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::none()
            },
        });
        assert_eq!(open.update(ctrl_c), Command::Quit);
    }

    #[test]
    fn resize_is_applied_on_next_render() {
        let mut screen = screen(false);
        let command = screen.update(InputEvent::Resize(ResizeEvent {
            width: 60,
            height: 16,
        }));
        assert_eq!(command, Command::Redraw);
        let frame = screen.render();
        assert_eq!(frame.size(), FrameSize { width: 60, height: 16 });
    }
}
