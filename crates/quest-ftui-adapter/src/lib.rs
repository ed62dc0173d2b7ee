//! quest-ftui-adapter: boundary layer for terminal UI primitives.
//!
//! Application crates draw through this crate's frame, style, and widget
//! contracts (badge, menu, selection, tooltip) and never talk to a terminal
//! backend directly. Only this local abstraction is imported by app crates.

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "quest-ftui-adapter"
}

/// Style and theme primitives consumed by the TUI crates.
pub mod style {
    /// Logical theme choices supported by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ThemeKind {
        Dark,
        Light,
        HighContrast,
    }

    impl ThemeKind {
        /// Resolves a configured theme name, defaulting to dark.
        #[must_use]
        pub fn from_name(name: &str) -> Self {
            match name.trim().to_ascii_lowercase().as_str() {
                "light" => Self::Light,
                "high-contrast" | "high_contrast" => Self::HighContrast,
                _ => Self::Dark,
            }
        }
    }

    /// Stable style tokens exposed to application crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StyleToken {
        Background,
        Surface,
        Foreground,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
    }

    /// Adapter palette uses terminal 256-color indexes for portability.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub background: u8,
        pub surface: u8,
        pub foreground: u8,
        pub muted: u8,
        pub accent: u8,
        pub success: u8,
        pub danger: u8,
        pub warning: u8,
        pub info: u8,
        pub focus: u8,
    }

    /// Typography emphasis policy per theme.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypographySpec {
        pub accent_bold: bool,
        pub danger_bold: bool,
        pub muted_dim: bool,
        pub focus_underline: bool,
    }

    /// Theme specification exposed to target TUI crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThemeSpec {
        pub kind: ThemeKind,
        pub palette: Palette,
        pub typography: TypographySpec,
    }

    impl ThemeSpec {
        /// Returns the color index for a stable style token.
        #[must_use]
        pub fn color(self, token: StyleToken) -> u8 {
            match token {
                StyleToken::Background => self.palette.background,
                StyleToken::Surface => self.palette.surface,
                StyleToken::Foreground => self.palette.foreground,
                StyleToken::Muted => self.palette.muted,
                StyleToken::Accent => self.palette.accent,
                StyleToken::Success => self.palette.success,
                StyleToken::Danger => self.palette.danger,
                StyleToken::Warning => self.palette.warning,
                StyleToken::Info => self.palette.info,
                StyleToken::Focus => self.palette.focus,
            }
        }

        /// Builds a theme for the requested style family.
        #[must_use]
        pub fn for_kind(kind: ThemeKind) -> Self {
            let palette = match kind {
                ThemeKind::Dark => Palette {
                    background: 16,
                    surface: 235,
                    foreground: 252,
                    muted: 244,
                    accent: 45,
                    success: 41,
                    danger: 197,
                    warning: 220,
                    info: 117,
                    focus: 81,
                },
                ThemeKind::Light => Palette {
                    background: 255,
                    surface: 252,
                    foreground: 234,
                    muted: 244,
                    accent: 25,
                    success: 28,
                    danger: 160,
                    warning: 172,
                    info: 31,
                    focus: 21,
                },
                ThemeKind::HighContrast => Palette {
                    background: 16,
                    surface: 232,
                    foreground: 231,
                    muted: 250,
                    accent: 51,
                    success: 118,
                    danger: 203,
                    warning: 226,
                    info: 159,
                    focus: 229,
                },
            };
            let typography = match kind {
                ThemeKind::Dark | ThemeKind::Light => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    muted_dim: true,
                    focus_underline: true,
                },
                ThemeKind::HighContrast => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    muted_dim: false,
                    focus_underline: true,
                },
            };
            Self {
                kind,
                palette,
                typography,
            }
        }
    }

    impl Default for ThemeSpec {
        fn default() -> Self {
            Self::for_kind(ThemeKind::Dark)
        }
    }
}

/// Cell-grid rendering primitives.
pub mod render {
    use super::style::{StyleToken, ThemeSpec};
    use super::widgets::BorderStyle;

    /// Terminal color as an ANSI256 index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TermColor {
        Ansi256(u8),
    }

    impl TermColor {
        #[must_use]
        pub fn as_ansi256(self) -> u8 {
            match self {
                Self::Ansi256(idx) => idx,
            }
        }
    }

    /// Frame dimensions in terminal cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameSize {
        pub width: usize,
        pub height: usize,
    }

    /// A rectangular region within a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rect {
        pub x: usize,
        pub y: usize,
        pub width: usize,
        pub height: usize,
    }

    impl Rect {
        #[must_use]
        pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        /// Inner region after removing border (1 cell each side).
        #[must_use]
        pub fn inner(self) -> Self {
            if self.width < 2 || self.height < 2 {
                return Self::new(self.x, self.y, 0, 0);
            }
            Self::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
        }

        #[must_use]
        pub fn right(self) -> usize {
            self.x + self.width
        }

        #[must_use]
        pub fn bottom(self) -> usize {
            self.y + self.height
        }

        #[must_use]
        pub fn is_empty(self) -> bool {
            self.width == 0 || self.height == 0
        }

        /// Whether the cell at (`x`, `y`) lies inside this region.
        #[must_use]
        pub fn contains(self, x: usize, y: usize) -> bool {
            x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
        }
    }

    /// Cell style represented as terminal colors and text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellStyle {
        pub fg: TermColor,
        pub bg: TermColor,
        pub bold: bool,
        pub dim: bool,
        pub underline: bool,
    }

    impl CellStyle {
        #[must_use]
        pub const fn plain(fg: TermColor, bg: TermColor) -> Self {
            Self {
                fg,
                bg,
                bold: false,
                dim: false,
                underline: false,
            }
        }
    }

    /// A single frame cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameCell {
        pub glyph: char,
        pub style: CellStyle,
    }

    /// Semantic role for rendered text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextRole {
        Primary,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
    }

    struct BorderChars {
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        horizontal: char,
        vertical: char,
    }

    fn border_chars(style: BorderStyle) -> BorderChars {
        match style {
            BorderStyle::Rounded => BorderChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Plain => BorderChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
        }
    }

    /// Stable frame abstraction shielding app crates from terminal backends.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RenderFrame {
        size: FrameSize,
        cells: Vec<FrameCell>,
        theme: ThemeSpec,
    }

    impl RenderFrame {
        /// Create a blank frame using the provided adapter theme.
        #[must_use]
        pub fn new(size: FrameSize, theme: ThemeSpec) -> Self {
            let default_cell = FrameCell {
                glyph: ' ',
                style: CellStyle::plain(
                    TermColor::Ansi256(theme.color(StyleToken::Foreground)),
                    TermColor::Ansi256(theme.color(StyleToken::Background)),
                ),
            };
            Self {
                size,
                cells: vec![default_cell; size.width.saturating_mul(size.height)],
                theme,
            }
        }

        #[must_use]
        pub fn size(&self) -> FrameSize {
            self.size
        }

        /// Returns one frame cell for assertions/snapshot helpers.
        #[must_use]
        pub fn cell(&self, x: usize, y: usize) -> Option<FrameCell> {
            if x >= self.size.width || y >= self.size.height {
                return None;
            }
            Some(self.cells[y * self.size.width + x])
        }

        /// Write a single cell, clipped to frame bounds.
        pub fn set_cell(&mut self, x: usize, y: usize, cell: FrameCell) {
            if x >= self.size.width || y >= self.size.height {
                return;
            }
            self.cells[y * self.size.width + x] = cell;
        }

        /// Draw text on a single row using a semantic role, clipped to frame width.
        pub fn draw_text(&mut self, x: usize, y: usize, text: &str, role: TextRole) {
            let (bold, dim, underline) = self.style_for_role(role);
            let style = CellStyle {
                fg: self.color_for_role(role),
                bg: TermColor::Ansi256(self.theme.color(StyleToken::Background)),
                bold,
                dim,
                underline,
            };
            self.draw_with_style(x, y, text, style);
        }

        /// Draw text with a complete cell style, returning the number of cells written.
        pub fn draw_with_style(&mut self, x: usize, y: usize, text: &str, style: CellStyle) -> usize {
            if y >= self.size.height || x >= self.size.width {
                return 0;
            }
            let mut written = 0;
            for (offset, glyph) in text.chars().enumerate() {
                let col = x + offset;
                if col >= self.size.width {
                    break;
                }
                self.cells[y * self.size.width + col] = FrameCell { glyph, style };
                written += 1;
            }
            written
        }

        /// Draw a bordered panel with an optional title.
        ///
        /// Returns the inner `Rect` (content area inside the border).
        pub fn draw_panel(
            &mut self,
            rect: Rect,
            title: &str,
            border: BorderStyle,
            border_color: TermColor,
            bg: TermColor,
        ) -> Rect {
            if rect.width < 2 || rect.height < 2 {
                return Rect::new(rect.x, rect.y, 0, 0);
            }
            self.fill_bg(rect, bg);

            let chars = border_chars(border);
            let edge = CellStyle::plain(border_color, bg);
            let right = rect.right() - 1;
            let bottom = rect.bottom() - 1;
            for col in rect.x + 1..right {
                self.set_cell(col, rect.y, edge_cell(chars.horizontal, edge));
                self.set_cell(col, bottom, edge_cell(chars.horizontal, edge));
            }
            for row in rect.y + 1..bottom {
                self.set_cell(rect.x, row, edge_cell(chars.vertical, edge));
                self.set_cell(right, row, edge_cell(chars.vertical, edge));
            }
            self.set_cell(rect.x, rect.y, edge_cell(chars.top_left, edge));
            self.set_cell(right, rect.y, edge_cell(chars.top_right, edge));
            self.set_cell(rect.x, bottom, edge_cell(chars.bottom_left, edge));
            self.set_cell(right, bottom, edge_cell(chars.bottom_right, edge));

            // ╭─ Title ─╮
            if !title.is_empty() && rect.width > 4 {
                let truncated: String = title.chars().take(rect.width - 4).collect();
                let label = format!(" {truncated} ");
                let style = CellStyle { bold: true, ..edge };
                for (i, glyph) in label.chars().enumerate() {
                    let col = rect.x + 1 + i;
                    if col >= right {
                        break;
                    }
                    self.set_cell(col, rect.y, FrameCell { glyph, style });
                }
            }

            rect.inner()
        }

        /// Fill a rectangular region with a background color.
        pub fn fill_bg(&mut self, rect: Rect, bg: TermColor) {
            let fg = TermColor::Ansi256(self.theme.color(StyleToken::Foreground));
            let style = CellStyle::plain(fg, bg);
            for row in rect.y..rect.bottom() {
                for col in rect.x..rect.right() {
                    self.set_cell(col, row, FrameCell { glyph: ' ', style });
                }
            }
        }

        #[must_use]
        pub fn row_text(&self, y: usize) -> String {
            if y >= self.size.height {
                return String::new();
            }
            let start = y * self.size.width;
            let end = start + self.size.width;
            self.cells[start..end]
                .iter()
                .map(|cell| cell.glyph)
                .collect()
        }

        /// Text-only snapshot helper for lightweight regression tests.
        #[must_use]
        pub fn snapshot(&self) -> String {
            (0..self.size.height)
                .map(|row| self.row_text(row))
                .collect::<Vec<_>>()
                .join("\n")
        }

        /// Returns the `TermColor` for a semantic role.
        #[must_use]
        pub fn color_for_role(&self, role: TextRole) -> TermColor {
            TermColor::Ansi256(match role {
                TextRole::Primary => self.theme.color(StyleToken::Foreground),
                TextRole::Muted => self.theme.color(StyleToken::Muted),
                TextRole::Accent => self.theme.color(StyleToken::Accent),
                TextRole::Success => self.theme.color(StyleToken::Success),
                TextRole::Danger => self.theme.color(StyleToken::Danger),
                TextRole::Warning => self.theme.color(StyleToken::Warning),
                TextRole::Info => self.theme.color(StyleToken::Info),
                TextRole::Focus => self.theme.color(StyleToken::Focus),
            })
        }

        /// Returns the `TermColor` for a style token.
        #[must_use]
        pub fn color_for_token(&self, token: StyleToken) -> TermColor {
            TermColor::Ansi256(self.theme.color(token))
        }

        fn style_for_role(&self, role: TextRole) -> (bool, bool, bool) {
            let typography = self.theme.typography;
            match role {
                TextRole::Primary | TextRole::Info | TextRole::Success | TextRole::Warning => {
                    (false, false, false)
                }
                TextRole::Muted => (false, typography.muted_dim, false),
                TextRole::Accent => (typography.accent_bold, false, false),
                TextRole::Danger => (typography.danger_bold, false, false),
                TextRole::Focus => (true, false, typography.focus_underline),
            }
        }
    }

    fn edge_cell(glyph: char, style: CellStyle) -> FrameCell {
        FrameCell { glyph, style }
    }
}

/// Shared widget vocabulary.
pub mod widgets {
    /// Border treatment exposed by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BorderStyle {
        Plain,
        Rounded,
    }
}

pub mod badge;
pub mod menu;
pub mod selection;
/// Snapshot helpers for adapter-based render abstractions.
pub mod snapshot;
pub mod tooltip;

/// Stable input/event abstraction shielding TUI crates from backend key models.
pub mod input {
    /// Canonical key set exposed to the TUI crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Key {
        Char(char),
        Enter,
        Escape,
        Tab,
        BackTab,
        Backspace,
        Up,
        Down,
        Left,
        Right,
    }

    /// Canonical keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers {
        pub shift: bool,
        pub ctrl: bool,
        pub alt: bool,
    }

    impl Modifiers {
        #[must_use]
        pub const fn none() -> Self {
            Self {
                shift: false,
                ctrl: false,
                alt: false,
            }
        }
    }

    /// Canonical key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyEvent {
        pub key: Key,
        pub modifiers: Modifiers,
    }

    impl KeyEvent {
        #[must_use]
        pub const fn plain(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers::none(),
            }
        }
    }

    /// Canonical mouse wheel direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MouseWheelDirection {
        Up,
        Down,
    }

    /// Canonical mouse event. `column`/`row` are frame cell coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseEvent {
        pub column: usize,
        pub row: usize,
        pub pressed: bool,
        pub wheel: Option<MouseWheelDirection>,
    }

    impl MouseEvent {
        /// Pointer moved to a cell without any button or wheel activity.
        #[must_use]
        pub const fn hover(column: usize, row: usize) -> Self {
            Self {
                column,
                row,
                pressed: false,
                wheel: None,
            }
        }

        /// Primary button press at a cell.
        #[must_use]
        pub const fn click(column: usize, row: usize) -> Self {
            Self {
                column,
                row,
                pressed: true,
                wheel: None,
            }
        }
    }

    /// Canonical frame resize event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEvent {
        pub width: usize,
        pub height: usize,
    }

    /// Stable input stream event consumed by the TUI crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputEvent {
        Key(KeyEvent),
        Mouse(MouseEvent),
        Resize(ResizeEvent),
        Tick,
    }

    /// Stable high-level actions produced by adapter input translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UiAction {
        Noop,
        MoveUp,
        MoveDown,
        MoveLeft,
        MoveRight,
        Confirm,
        Cancel,
        FocusNext,
        FocusPrev,
        Refresh,
        ScrollUp,
        ScrollDown,
        Quit,
    }

    /// Translator trait allowing alternate mappings without exposing backend APIs.
    pub trait InputTranslator {
        fn translate(&self, event: &InputEvent) -> UiAction;
    }

    /// Default keymap.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct DefaultInputTranslator;

    impl InputTranslator for DefaultInputTranslator {
        fn translate(&self, event: &InputEvent) -> UiAction {
            match event {
                InputEvent::Key(KeyEvent { key, modifiers }) => match key {
                    Key::Char('c') if modifiers.ctrl => UiAction::Quit,
                    Key::Char('r') if modifiers.ctrl => UiAction::Refresh,
                    Key::Up | Key::Char('k') => UiAction::MoveUp,
                    Key::Down | Key::Char('j') => UiAction::MoveDown,
                    Key::Left | Key::Char('h') => UiAction::MoveLeft,
                    Key::Right | Key::Char('l') => UiAction::MoveRight,
                    Key::Enter | Key::Char(' ') => UiAction::Confirm,
                    Key::Escape => UiAction::Cancel,
                    Key::Tab if modifiers.shift => UiAction::FocusPrev,
                    Key::Tab => UiAction::FocusNext,
                    Key::BackTab => UiAction::FocusPrev,
                    Key::Char('q') => UiAction::Quit,
                    _ => UiAction::Noop,
                },
                InputEvent::Mouse(MouseEvent {
                    wheel: Some(MouseWheelDirection::Up),
                    ..
                }) => UiAction::ScrollUp,
                InputEvent::Mouse(MouseEvent {
                    wheel: Some(MouseWheelDirection::Down),
                    ..
                }) => UiAction::ScrollDown,
                InputEvent::Mouse(_) => UiAction::Noop,
                InputEvent::Resize(_) | InputEvent::Tick => UiAction::Refresh,
            }
        }
    }

    /// Convenience function for adapter consumers that do not need custom mapping.
    #[must_use]
    pub fn translate_input(event: &InputEvent) -> UiAction {
        DefaultInputTranslator.translate(event)
    }
}
