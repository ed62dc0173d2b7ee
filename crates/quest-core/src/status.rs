//! Quest lifecycle statuses.

use std::fmt;

/// Key type accepted by the status registry and the status widgets.
///
/// `Status` is the production implementation. Tests implement it for small
/// fixture enums so a registry can be substituted without touching `Status`.
pub trait StatusKey: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Stable machine identifier (used for menu item ids and config keys).
    fn slug(self) -> &'static str;
}

/// Closed set of quest lifecycle stages, in registry display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    NotStarted,
    InProgress,
    ReadyToFile,
    Filed,
    Complete,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::NotStarted,
        Status::InProgress,
        Status::ReadyToFile,
        Status::Filed,
        Status::Complete,
    ];

    /// Parses a slug, tolerating case, surrounding whitespace, and `-`/`_` spelling.
    #[must_use]
    pub fn from_slug(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "not_started" | "notstarted" => Some(Self::NotStarted),
            "in_progress" | "inprogress" => Some(Self::InProgress),
            "ready_to_file" | "readytofile" => Some(Self::ReadyToFile),
            "filed" => Some(Self::Filed),
            "complete" | "completed" => Some(Self::Complete),
            _ => None,
        }
    }
}

impl StatusKey for Status {
    fn slug(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::ReadyToFile => "ready_to_file",
            Self::Filed => "filed",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
