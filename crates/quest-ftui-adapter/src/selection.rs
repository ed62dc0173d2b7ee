//! Key-set selection model shared by list-like widgets.
//!
//! Widgets are controlled: the owner keeps the current [`SelectionSet`] and
//! the widget only proposes the next one through [`SelectionPolicy`].

/// How many keys a widget may hold selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    None,
    Single,
    Multiple,
}

/// Insertion-ordered set of selected keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<K> {
    keys: Vec<K>,
}

impl<K> Default for SelectionSet<K> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<K: Copy + PartialEq> SelectionSet<K> {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(key: K) -> Self {
        Self { keys: vec![key] }
    }

    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Adds `key`; returns false when it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Removes `key`; returns false when it was absent.
    pub fn remove(&mut self, key: K) -> bool {
        let before = self.keys.len();
        self.keys.retain(|candidate| *candidate != key);
        self.keys.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }

    /// The key when exactly one is selected.
    #[must_use]
    pub fn only(&self) -> Option<K> {
        match self.keys.as_slice() {
            [key] => Some(*key),
            _ => None,
        }
    }
}

impl<K: Copy + PartialEq> FromIterator<K> for SelectionSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Selection rules for a widget: mode plus the empty-selection guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPolicy {
    pub mode: SelectionMode,
    pub disallow_empty: bool,
}

impl SelectionPolicy {
    /// Exactly one key, never empty.
    #[must_use]
    pub const fn single_required() -> Self {
        Self {
            mode: SelectionMode::Single,
            disallow_empty: true,
        }
    }

    /// Next selection after the user activates `key`, or `None` when the
    /// activation leaves the selection unchanged.
    #[must_use]
    pub fn next_selection<K: Copy + PartialEq>(
        &self,
        current: &SelectionSet<K>,
        key: K,
    ) -> Option<SelectionSet<K>> {
        match self.mode {
            SelectionMode::None => None,
            SelectionMode::Single => {
                if !current.contains(key) {
                    return Some(SelectionSet::single(key));
                }
                if self.disallow_empty {
                    None
                } else {
                    Some(SelectionSet::empty())
                }
            }
            SelectionMode::Multiple => {
                let mut next = current.clone();
                if next.contains(key) {
                    if self.disallow_empty && next.len() == 1 {
                        return None;
                    }
                    next.remove(key);
                } else {
                    next.insert(key);
                }
                Some(next)
            }
        }
    }
}
