//! Cache - Per-id profiles frozen at first open
//!
//! A profile is derived once from an owned copy of the live record and
//! then never touched again, so background refreshes of the live data
//! cannot change an open or reopened detail view.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A display record derived from a source snapshot.
///
/// `derive` must be pure: the snapshot it is handed is the only input.
pub trait DeriveProfile: Sized {
    type Source: Clone;

    fn derive(snapshot: Self::Source) -> Self;
}

/// Append-only map from entity id to its frozen profile
#[derive(Debug)]
pub struct SnapshotCache<P> {
    entries: HashMap<String, Arc<P>>,
}

impl<P: DeriveProfile> SnapshotCache<P> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached profile for `id`, or derive one from a copy of `source`.
    ///
    /// On a hit `source` is ignored. On a miss with no source nothing is
    /// cached and `None` comes back.
    pub fn get_or_create(&mut self, id: &str, source: Option<&P::Source>) -> Option<Arc<P>> {
        if let Some(profile) = self.entries.get(id) {
            log::debug!("profile cache hit for {:?}", id);
            return Some(Arc::clone(profile));
        }
        let snapshot = source?.clone();
        log::debug!("profile cache miss for {:?}, deriving", id);
        let profile = Arc::new(P::derive(snapshot));
        self.entries.insert(id.to_string(), Arc::clone(&profile));
        Some(profile)
    }

    pub fn get(&self, id: &str) -> Option<Arc<P>> {
        self.entries.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: DeriveProfile> Default for SnapshotCache<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapsible sections of a detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    Overview,
    Vitals,
    Device,
    Performance,
    Contact,
}

/// Host for one detail view: the profile cache plus transient UI state
#[derive(Debug)]
pub struct ProfileModal<P> {
    cache: SnapshotCache<P>,
    open_id: Option<String>,
    expanded: HashSet<ProfileSection>,
}

impl<P: DeriveProfile> ProfileModal<P> {
    pub fn new() -> Self {
        Self {
            cache: SnapshotCache::new(),
            open_id: None,
            expanded: HashSet::new(),
        }
    }

    /// Open the view for `id`. With nothing cached and no source, the view stays closed.
    pub fn open(&mut self, id: &str, source: Option<&P::Source>) -> Option<Arc<P>> {
        let profile = self.cache.get_or_create(id, source)?;
        self.open_id = Some(id.to_string());
        Some(profile)
    }

    /// Profile of the open view, if any
    pub fn current(&self) -> Option<Arc<P>> {
        self.open_id.as_deref().and_then(|id| self.cache.get(id))
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open_id.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open_id.is_some()
    }

    /// Flip a section; returns whether it is now expanded
    pub fn toggle_section(&mut self, section: ProfileSection) -> bool {
        if self.expanded.remove(&section) {
            false
        } else {
            self.expanded.insert(section);
            true
        }
    }

    pub fn is_expanded(&self, section: ProfileSection) -> bool {
        self.expanded.contains(&section)
    }

    /// Close the view. Cached profiles stay for the modal's lifetime.
    pub fn clear(&mut self) {
        self.open_id = None;
        self.expanded.clear();
    }

    pub fn cache(&self) -> &SnapshotCache<P> {
        &self.cache
    }
}

impl<P: DeriveProfile> Default for ProfileModal<P> {
    fn default() -> Self {
        Self::new()
    }
}
