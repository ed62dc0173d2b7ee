//! quest-tui: terminal status controls for quests.
//!
//! [`status_badge::StatusBadge`] draws one status, [`status_select::StatusSelect`]
//! lets the user change it, and [`screen::QuestStatusScreen`] hosts both for
//! the `quest-status` binary.

use quest_core::config::TuiConfig;
use quest_ftui_adapter::input::{translate_input, InputEvent, UiAction};
use quest_ftui_adapter::style::{ThemeKind, ThemeSpec};

pub mod logging;
pub mod screen;
pub mod status_badge;
pub mod status_select;
pub mod theme;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "quest-tui"
}

#[must_use]
pub fn default_theme() -> ThemeSpec {
    ThemeSpec::for_kind(ThemeKind::Dark)
}

/// Theme for the configured name on a terminal with `capability`.
#[must_use]
pub fn theme_for_config(
    config: &TuiConfig,
    capability: theme::TerminalColorCapability,
) -> ThemeSpec {
    theme::resolve_theme(&config.theme, capability)
}

/// Resolve the runtime theme from config and current terminal hints.
#[must_use]
pub fn detected_theme(config: &TuiConfig) -> ThemeSpec {
    theme_for_config(config, theme::detect_terminal_color_capability())
}

/// Input mapping is sourced from the adapter event/input abstraction.
#[must_use]
pub fn map_input(event: InputEvent) -> UiAction {
    translate_input(&event)
}

#[cfg(test)]
mod tests {
    use super::{crate_label, default_theme, map_input, theme_for_config};
    use crate::theme::TerminalColorCapability;
    use quest_core::config::TuiConfig;
    use quest_ftui_adapter::input::{InputEvent, Key, KeyEvent, UiAction};
    use quest_ftui_adapter::style::ThemeKind;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "quest-tui");
    }

    #[test]
    fn default_theme_is_dark() {
        assert_eq!(default_theme().kind, ThemeKind::Dark);
    }

    #[test]
    fn configured_theme_respects_capability() {
        let config = TuiConfig {
            theme: "light".to_owned(),
            ..TuiConfig::default()
        };
        assert_eq!(
            theme_for_config(&config, TerminalColorCapability::Ansi256).kind,
            ThemeKind::Light
        );
        assert_eq!(
            theme_for_config(&config, TerminalColorCapability::Ansi16).kind,
            ThemeKind::HighContrast
        );
    }

    #[test]
    fn maps_keys_through_adapter() {
        let action = map_input(InputEvent::Key(KeyEvent::plain(Key::Enter)));
        assert_eq!(action, UiAction::Confirm);
    }
}
