use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as TerminalEvent,
    KeyCode as TerminalKeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use quest_core::config::TuiConfig;
use quest_core::{Status, StatusRegistry};
use quest_ftui_adapter::input::{
    InputEvent, Key, KeyEvent, Modifiers, MouseEvent, MouseWheelDirection, ResizeEvent,
};
use quest_ftui_adapter::render::{CellStyle, FrameSize, RenderFrame, TermColor};
use quest_ftui_adapter::style::ThemeSpec;
use quest_tui::screen::{Command, QuestRecord, QuestStatusScreen, ScreenOptions};

pub fn run(
    registry: &StatusRegistry<Status>,
    config: &TuiConfig,
    theme: ThemeSpec,
) -> Result<(), String> {
    let mut terminal_session =
        TerminalSession::enter().map_err(|err| format!("enter tui terminal mode: {err}"))?;
    let (width, height) = terminal_size().map_err(|err| format!("read terminal size: {err}"))?;
    let mut screen = QuestStatusScreen::new(
        registry,
        QuestRecord::demo(config.is_core),
        ScreenOptions::from_config(config),
        theme,
        FrameSize { width, height },
    );

    let mut dirty = true;
    loop {
        if dirty {
            let frame = screen.render();
            render_frame(&mut terminal_session.stdout, &frame)
                .map_err(|err| format!("render frame: {err}"))?;
            dirty = false;
        }

        if screen.quitting() {
            break;
        }

        let event = event::read().map_err(|err| format!("read terminal event: {err}"))?;
        if is_interrupt(&event) {
            break;
        }

        if let Some(input) = map_terminal_event(event) {
            match screen.update(input) {
                Command::Quit => break,
                Command::Redraw => dirty = true,
                Command::None => {}
            }
        }
    }

    Ok(())
}

fn terminal_size() -> io::Result<(usize, usize)> {
    let (width, height) = terminal::size()?;
    Ok((usize::from(width), usize::from(height)))
}

fn map_terminal_event(event: TerminalEvent) -> Option<InputEvent> {
    match event {
        TerminalEvent::Resize(width, height) => Some(InputEvent::Resize(ResizeEvent {
            width: usize::from(width),
            height: usize::from(height),
        })),
        TerminalEvent::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }

            let key = match key_event.code {
                TerminalKeyCode::Char(ch) => Key::Char(ch),
                TerminalKeyCode::Enter => Key::Enter,
                TerminalKeyCode::Esc => Key::Escape,
                TerminalKeyCode::Tab => Key::Tab,
                TerminalKeyCode::BackTab => Key::BackTab,
                TerminalKeyCode::Backspace => Key::Backspace,
                TerminalKeyCode::Up => Key::Up,
                TerminalKeyCode::Down => Key::Down,
                TerminalKeyCode::Left => Key::Left,
                TerminalKeyCode::Right => Key::Right,
                _ => return None,
            };

            let modifiers = Modifiers {
                shift: key_event.modifiers.contains(KeyModifiers::SHIFT),
                ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
                alt: key_event.modifiers.contains(KeyModifiers::ALT),
            };

            Some(InputEvent::Key(KeyEvent { key, modifiers }))
        }
        TerminalEvent::Mouse(mouse) => {
            let column = usize::from(mouse.column);
            let row = usize::from(mouse.row);
            let mapped = match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseEvent::click(column, row),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseEvent::hover(column, row),
                MouseEventKind::ScrollUp => MouseEvent {
                    wheel: Some(MouseWheelDirection::Up),
                    ..MouseEvent::hover(column, row)
                },
                MouseEventKind::ScrollDown => MouseEvent {
                    wheel: Some(MouseWheelDirection::Down),
                    ..MouseEvent::hover(column, row)
                },
                _ => return None,
            };
            Some(InputEvent::Mouse(mapped))
        }
        _ => None,
    }
}

fn is_interrupt(event: &TerminalEvent) -> bool {
    let TerminalEvent::Key(key_event) = event else {
        return false;
    };

    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }

    matches!(key_event.code, TerminalKeyCode::Char('c'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

fn render_frame<W: Write>(out: &mut W, frame: &RenderFrame) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    let size = frame.size();

    for y in 0..size.height {
        queue!(out, MoveTo(0, to_u16(y)))?;
        let mut style = None;
        for x in 0..size.width {
            if let Some(cell) = frame.cell(x, y) {
                if style != Some(cell.style) {
                    queue_style(out, cell.style)?;
                    style = Some(cell.style);
                }
                queue!(out, Print(cell.glyph))?;
            }
        }
    }

    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

fn to_crossterm(color: TermColor) -> Color {
    Color::AnsiValue(color.as_ansi256())
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_crossterm(style.fg)),
        SetBackgroundColor(to_crossterm(style.bg)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show,
            MoveTo(0, 0)
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::{is_interrupt, map_terminal_event, render_frame, to_u16};
    use crossterm::event::{
        Event as TerminalEvent, KeyCode, KeyEvent as TerminalKeyEvent, KeyModifiers, MouseButton,
        MouseEvent as TerminalMouseEvent, MouseEventKind,
    };
    use quest_ftui_adapter::input::{InputEvent, Key, KeyEvent, MouseEvent};
    use quest_ftui_adapter::render::{FrameSize, RenderFrame, TextRole};
    use quest_ftui_adapter::style::{StyleToken, ThemeSpec};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> TerminalEvent {
        TerminalEvent::Mouse(TerminalMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_adapter_events() {
        let event = TerminalEvent::Key(TerminalKeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        match map_terminal_event(event) {
            Some(InputEvent::Key(KeyEvent { key, modifiers })) => {
                assert_eq!(key, Key::BackTab);
                assert!(modifiers.shift);
            }
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    #[test]
    fn mouse_press_and_motion_map_to_click_and_hover() {
        assert_eq!(
            map_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)),
            Some(InputEvent::Mouse(MouseEvent::click(4, 2)))
        );
        assert_eq!(
            map_terminal_event(mouse(MouseEventKind::Moved, 7, 1)),
            Some(InputEvent::Mouse(MouseEvent::hover(7, 1)))
        );
        assert_eq!(
            map_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2)),
            None
        );
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let ctrl_c = TerminalEvent::Key(TerminalKeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        assert!(is_interrupt(&ctrl_c));
        let plain = TerminalEvent::Key(TerminalKeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!is_interrupt(&plain));
    }

    #[test]
    fn to_u16_saturates() {
        assert_eq!(to_u16(12), 12);
        assert_eq!(to_u16(usize::MAX), u16::MAX);
    }

    #[test]
    fn frames_render_as_ansi256_escapes() {
        let theme = ThemeSpec::default();
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 4,
                height: 1,
            },
            theme,
        );
        frame.draw_text(0, 0, "ok", TextRole::Primary);
        let mut out = Vec::new();
        if let Err(err) = render_frame(&mut out, &frame) {
            panic!("render: {err}");
        }
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ok"));
        let background = format!("\u{1b}[48;5;{}m", theme.color(StyleToken::Background));
        assert!(text.contains(&background), "{text:?}");
    }
}
