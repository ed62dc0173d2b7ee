//! Status variant styling and terminal color capability hints.

use quest_core::StatusVariant;
use quest_ftui_adapter::style::{StyleToken, ThemeKind, ThemeSpec};

/// Color depth the attached terminal advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorCapability {
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Reads `COLORTERM`/`TERM` from the process environment.
#[must_use]
pub fn detect_terminal_color_capability() -> TerminalColorCapability {
    capability_from_env(|name| std::env::var(name).ok())
}

#[must_use]
pub fn capability_from_env<F>(lookup: F) -> TerminalColorCapability
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        return TerminalColorCapability::Ansi16;
    }
    let colorterm = lookup("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return TerminalColorCapability::TrueColor;
    }
    let term = lookup("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("256color") {
        return TerminalColorCapability::Ansi256;
    }
    match term.trim() {
        "" | "dumb" | "linux" | "vt100" | "vt220" | "ansi" => TerminalColorCapability::Ansi16,
        _ => TerminalColorCapability::Ansi256,
    }
}

/// Style token a badge of `variant` is painted with.
#[must_use]
pub fn variant_token(variant: StatusVariant) -> StyleToken {
    match variant {
        StatusVariant::Neutral => StyleToken::Surface,
        StatusVariant::Info => StyleToken::Info,
        StatusVariant::Warning => StyleToken::Warning,
        StatusVariant::Success => StyleToken::Success,
        StatusVariant::Danger => StyleToken::Danger,
    }
}

/// Configured theme name, forced to high contrast on 16-color terminals.
#[must_use]
pub fn resolve_theme(name: &str, capability: TerminalColorCapability) -> ThemeSpec {
    match capability {
        TerminalColorCapability::Ansi16 => ThemeSpec::for_kind(ThemeKind::HighContrast),
        TerminalColorCapability::Ansi256 | TerminalColorCapability::TrueColor => {
            ThemeSpec::for_kind(ThemeKind::from_name(name))
        }
    }
}
