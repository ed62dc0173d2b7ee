use quest_core::config::TuiConfig;
use quest_core::{builtin_registry, StatusDescriptor, StatusKey, StatusRegistry, StatusVariant};
use quest_ftui_adapter::input::{InputEvent, Key, KeyEvent, ResizeEvent};
use quest_ftui_adapter::render::{FrameSize, RenderFrame};
use quest_ftui_adapter::snapshot::assert_render_frame_snapshot;
use quest_ftui_adapter::style::ThemeSpec;
use quest_tui::screen::{render_snapshot_text, QuestRecord, QuestStatusScreen, ScreenOptions};
use quest_tui::status_select::StatusSelect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Fixture {
    Open,
    Archived,
}

impl StatusKey for Fixture {
    fn slug(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Archived => "archived",
        }
    }
}

fn padded(rows: &[&str], width: usize) -> String {
    rows.iter()
        .map(|row| {
            let fill = width.saturating_sub(row.chars().count());
            format!("{row}{}", " ".repeat(fill))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn key(key: Key) -> InputEvent {
    InputEvent::Key(KeyEvent::plain(key))
}

fn screen(width: usize, height: usize, is_core: bool) -> QuestStatusScreen<'static> {
    QuestStatusScreen::new(
        builtin_registry(),
        QuestRecord::demo(is_core),
        ScreenOptions::default(),
        ThemeSpec::default(),
        FrameSize { width, height },
    )
}

#[test]
fn open_select_snapshot() {
    let registry = match StatusRegistry::from_entries([
        (
            Fixture::Open,
            StatusDescriptor::new("Open", '○', StatusVariant::Info, false),
        ),
        (
            Fixture::Archived,
            StatusDescriptor::new("Archived", '▣', StatusVariant::Neutral, true),
        ),
    ]) {
        Ok(registry) => registry,
        Err(err) => panic!("fixture registry: {err}"),
    };
    let mut select = StatusSelect::new(&registry, Fixture::Open, true, |_| {});
    select.open();
    let mut frame = RenderFrame::new(
        FrameSize {
            width: 24,
            height: 6,
        },
        ThemeSpec::default(),
    );
    select.render(&mut frame, 0, 0);
    assert_render_frame_snapshot(
        "status-select-open",
        &frame,
        &padded(
            &[
                " ○ Open   ▴",
                "╭ Status ────────╮",
                "│▌ ○ Open      ✓ │",
                "│  ▣ Archived    │",
                "╰────────────────╯",
                "",
            ],
            24,
        ),
    );
}

#[test]
fn screen_layout_at_80_columns() {
    let mut screen = screen(80, 18, false);
    let frame = screen.render();
    assert_eq!(frame.row_text(0).trim_end(), " Quest status");
    assert_eq!(
        frame.row_text(2).trim_end(),
        "  Quest    Chart the sunken archive"
    );
    assert_eq!(frame.row_text(4).trim_end(), "  Status    ◐ In progress   ▾");
    assert_eq!(
        frame.row_text(13).trim_end(),
        "  Legend    ○   ◐   ◆   ▣   ●"
    );
    assert_eq!(
        frame.row_text(17).trim_end(),
        "  tab focus  enter open  c core  q quit"
    );
}

#[test]
fn legend_glyphs_widen_at_large_breakpoint() {
    let mut screen = screen(80, 18, false);
    screen.update(InputEvent::Resize(ResizeEvent {
        width: 120,
        height: 24,
    }));
    let frame = screen.render();
    assert_eq!(
        frame.row_text(13).trim_end(),
        "  Legend     ○     ◐     ◆     ▣     ●"
    );
}

#[test]
fn core_screen_marks_the_quest() {
    let mut screen = screen(80, 18, true);
    let frame = screen.render();
    assert_eq!(&frame.row_text(0)[frame.row_text(0).len() - 7..], "[core] ");
}

#[test]
fn open_menu_overlays_the_screen() {
    let mut screen = screen(80, 18, false);
    screen.update(key(Key::Enter));
    let frame = screen.render();
    assert!(frame.row_text(4).contains('▴'));
    assert!(frame.row_text(5).contains("╭ Status "));
    assert!(frame.row_text(6).contains("○ Not started"));
    assert!(frame.row_text(7).contains("▌ ◐ In progress"));
    assert!(frame.row_text(7).contains('✓'));
    assert!(frame.row_text(8).contains("● Complete"));
    assert!(frame.row_text(9).contains('╰'));
}

#[test]
fn history_line_reports_the_last_change() {
    let mut screen = screen(80, 18, false);
    screen.update(key(Key::Enter));
    screen.update(key(Key::Up));
    screen.update(key(Key::Enter));
    let frame = screen.render();
    assert_eq!(frame.row_text(16).trim_end(), "  status set to Not started");
    assert_eq!(frame.row_text(4).trim_end(), "  Status    ○ Not started   ▾");
}

#[test]
fn snapshot_text_is_newline_terminated_plain_text() {
    let text = render_snapshot_text(builtin_registry(), &TuiConfig::default(), ThemeSpec::default());
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().count(), 18);
    assert!(text.contains("In progress"));
    assert!(!text.contains('\u{1b}'));
}
