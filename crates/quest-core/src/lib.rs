//! quest-core: status model, registry, and configuration for quest status controls.
//!
//! This crate owns the closed set of quest lifecycle statuses, the ordered
//! registry of display metadata for them, and the configuration layer shared
//! by the TUI crates. It has no rendering dependencies.

pub mod config;
pub mod error;
pub mod registry;
pub mod status;

pub use error::{ConfigError, RegistryError};
pub use registry::{
    builtin_registry, should_show, RegistryOverrides, StatusDescriptor, StatusOverride,
    StatusRegistry, StatusVariant,
};
pub use status::{Status, StatusKey};

/// Crate identity label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "quest-core"
}
