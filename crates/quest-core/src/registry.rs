//! Ordered, read-only registry of status display metadata.
//!
//! The registry is passed to widgets explicitly instead of being read from a
//! global, so tests can substitute a fixture registry keyed by their own
//! [`StatusKey`] type. [`builtin_registry`] is the process-wide default for
//! [`Status`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::status::{Status, StatusKey};

/// Visual style token for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusVariant {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

/// Display metadata for one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub label: String,
    pub icon: char,
    pub variant: StatusVariant,
    /// Hidden from menus unless the caller declares a core quest.
    pub core_only: bool,
}

impl StatusDescriptor {
    #[must_use]
    pub fn new(label: &str, icon: char, variant: StatusVariant, core_only: bool) -> Self {
        Self {
            label: label.to_owned(),
            icon,
            variant,
            core_only,
        }
    }
}

/// Whether a status may be offered as a menu candidate.
#[must_use]
pub fn should_show(descriptor: &StatusDescriptor, is_core: bool) -> bool {
    !descriptor.core_only || is_core
}

/// Ordered mapping from status key to descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry<S> {
    entries: Vec<(S, StatusDescriptor)>,
}

impl<S: StatusKey> StatusRegistry<S> {
    /// Builds a registry, keeping the given order.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, StatusDescriptor)>,
    {
        let mut seen = BTreeSet::new();
        let mut collected = Vec::new();
        for (status, descriptor) in entries {
            if !seen.insert(status) {
                return Err(RegistryError::DuplicateStatus(status.slug().to_owned()));
            }
            if descriptor.label.trim().is_empty() {
                return Err(RegistryError::EmptyLabel(status.slug().to_owned()));
            }
            collected.push((status, descriptor));
        }
        Ok(Self { entries: collected })
    }

    #[must_use]
    pub fn get(&self, status: S) -> Option<&StatusDescriptor> {
        self.entries
            .iter()
            .find(|(key, _)| *key == status)
            .map(|(_, descriptor)| descriptor)
    }

    /// Strict lookup for callers that treat a missing descriptor as a bug.
    pub fn lookup(&self, status: S) -> Result<&StatusDescriptor, RegistryError> {
        self.get(status)
            .ok_or_else(|| RegistryError::UnknownStatus(status.slug().to_owned()))
    }

    #[must_use]
    pub fn contains(&self, status: S) -> bool {
        self.get(status).is_some()
    }

    /// Entries in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &StatusDescriptor)> + '_ {
        self.entries
            .iter()
            .map(|(status, descriptor)| (*status, descriptor))
    }

    pub fn keys(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.iter().map(|(status, _)| *status)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Statuses offered in a menu, in declared order.
    #[must_use]
    pub fn candidates(&self, is_core: bool) -> Vec<S> {
        self.iter()
            .filter(|(_, descriptor)| should_show(descriptor, is_core))
            .map(|(status, _)| status)
            .collect()
    }

    /// Returns a copy with per-slug overrides applied.
    pub fn with_overrides(&self, overrides: &RegistryOverrides) -> Result<Self, RegistryError> {
        let mut entries = self.entries.clone();
        for (slug, patch) in &overrides.entries {
            let wanted = normalize_slug(slug);
            let Some((status, descriptor)) = entries
                .iter_mut()
                .find(|(status, _)| normalize_slug(status.slug()) == wanted)
            else {
                return Err(RegistryError::UnknownSlug(slug.clone()));
            };
            if let Some(label) = &patch.label {
                if label.trim().is_empty() {
                    return Err(RegistryError::EmptyLabel(status.slug().to_owned()));
                }
                descriptor.label = label.trim().to_owned();
            }
            if let Some(icon) = patch.icon {
                descriptor.icon = icon;
            }
            if let Some(variant) = patch.variant {
                descriptor.variant = variant;
            }
            if let Some(core_only) = patch.core_only {
                descriptor.core_only = core_only;
            }
            tracing::debug!(status = status.slug(), "applied status override");
        }
        Ok(Self { entries })
    }
}

impl StatusRegistry<Status> {
    /// Default descriptors for every [`Status`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (
                    Status::NotStarted,
                    StatusDescriptor::new("Not started", '○', StatusVariant::Neutral, false),
                ),
                (
                    Status::InProgress,
                    StatusDescriptor::new("In progress", '◐', StatusVariant::Info, false),
                ),
                (
                    Status::ReadyToFile,
                    StatusDescriptor::new("Ready to file", '◆', StatusVariant::Warning, true),
                ),
                (
                    Status::Filed,
                    StatusDescriptor::new("Filed", '▣', StatusVariant::Info, true),
                ),
                (
                    Status::Complete,
                    StatusDescriptor::new("Complete", '●', StatusVariant::Success, false),
                ),
            ],
        }
    }
}

/// Shared immutable instance of [`StatusRegistry::builtin`].
pub fn builtin_registry() -> &'static StatusRegistry<Status> {
    static REGISTRY: OnceLock<StatusRegistry<Status>> = OnceLock::new();
    REGISTRY.get_or_init(StatusRegistry::builtin)
}

/// Partial descriptor patch read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusOverride {
    pub label: Option<String>,
    pub icon: Option<char>,
    pub variant: Option<StatusVariant>,
    pub core_only: Option<bool>,
}

/// Overrides keyed by status slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RegistryOverrides {
    pub entries: BTreeMap<String, StatusOverride>,
}

impl RegistryOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_slug(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn fixture_registry() -> StatusRegistry<Fixture> {
        match StatusRegistry::from_entries([
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
        }
    }

    #[test]
    fn should_show_hides_core_only_unless_core() {
        let core_only = StatusDescriptor::new("Filed", '▣', StatusVariant::Info, true);
        let open = StatusDescriptor::new("Open", '○', StatusVariant::Info, false);
        assert!(!should_show(&core_only, false));
        assert!(should_show(&core_only, true));
        assert!(should_show(&open, false));
        assert!(should_show(&open, true));
    }

    #[test]
    fn candidates_respect_core_flag_and_order() {
        let registry = fixture_registry();
        assert_eq!(registry.candidates(false), vec![Fixture::Open]);
        assert_eq!(
            registry.candidates(true),
            vec![Fixture::Open, Fixture::Archived]
        );
    }

    #[test]
    fn builtin_candidates_hide_filing_stages() {
        let registry = builtin_registry();
        assert_eq!(
            registry.candidates(false),
            vec![Status::NotStarted, Status::InProgress, Status::Complete]
        );
        assert_eq!(registry.candidates(true), Status::ALL.to_vec());
    }

    #[test]
    fn builtin_is_total_over_status() {
        let registry = builtin_registry();
        for status in Status::ALL {
            assert!(registry.contains(status), "missing {status}");
        }
        let rebuilt = StatusRegistry::from_entries(
            registry
                .iter()
                .map(|(status, descriptor)| (status, descriptor.clone())),
        );
        assert_eq!(rebuilt.as_ref().ok(), Some(registry));
    }

    #[test]
    fn from_entries_rejects_duplicates_and_blank_labels() {
        let duplicate = StatusRegistry::from_entries([
            (
                Fixture::Open,
                StatusDescriptor::new("Open", '○', StatusVariant::Info, false),
            ),
            (
                Fixture::Open,
                StatusDescriptor::new("Again", '○', StatusVariant::Info, false),
            ),
        ]);
        assert_eq!(
            duplicate,
            Err(RegistryError::DuplicateStatus("open".into()))
        );

        let blank = StatusRegistry::from_entries([(
            Fixture::Archived,
            StatusDescriptor::new("  ", '▣', StatusVariant::Neutral, true),
        )]);
        assert_eq!(blank, Err(RegistryError::EmptyLabel("archived".into())));
    }

    #[test]
    fn lookup_reports_missing_status() {
        let registry = match StatusRegistry::from_entries([(
            Fixture::Open,
            StatusDescriptor::new("Open", '○', StatusVariant::Info, false),
        )]) {
            Ok(registry) => registry,
            Err(err) => panic!("registry: {err}"),
        };
        assert!(registry.get(Fixture::Archived).is_none());
        assert_eq!(
            registry.lookup(Fixture::Archived),
            Err(RegistryError::UnknownStatus("archived".into()))
        );
        assert_eq!(
            registry.lookup(Fixture::Open).map(|d| d.label.as_str()),
            Ok("Open")
        );
    }

    #[test]
    fn overrides_patch_matching_entries_only() {
        let mut overrides = RegistryOverrides::default();
        overrides.entries.insert(
            "Ready-To-File".into(),
            StatusOverride {
                label: Some("Ready".into()),
                core_only: Some(false),
                ..StatusOverride::default()
            },
        );
        let patched = match builtin_registry().with_overrides(&overrides) {
            Ok(registry) => registry,
            Err(err) => panic!("overrides: {err}"),
        };
        let ready = patched.get(Status::ReadyToFile);
        assert_eq!(ready.map(|d| d.label.as_str()), Some("Ready"));
        assert_eq!(ready.map(|d| d.core_only), Some(false));
        assert_eq!(ready.map(|d| d.icon), Some('◆'));
        assert_eq!(patched.get(Status::Filed), builtin_registry().get(Status::Filed));
    }

    #[test]
    fn overrides_reject_unknown_slug_and_blank_label() {
        let mut unknown = RegistryOverrides::default();
        unknown
            .entries
            .insert("archived".into(), StatusOverride::default());
        assert_eq!(
            builtin_registry().with_overrides(&unknown),
            Err(RegistryError::UnknownSlug("archived".into()))
        );

        let mut blank = RegistryOverrides::default();
        blank.entries.insert(
            "filed".into(),
            StatusOverride {
                label: Some(" ".into()),
                ..StatusOverride::default()
            },
        );
        assert_eq!(
            builtin_registry().with_overrides(&blank),
            Err(RegistryError::EmptyLabel("filed".into()))
        );
    }
}
