//! Taxonomy model: the normalized shape every repository scan produces.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Role tag assumed for playbooks in the legacy layout without role directories.
pub const DEFAULT_PLAYBOOK_ROLE: &str = "osp_controller";

/// A plugin as declared in the plugin source repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    /// Slash-joined domain path below the `plugins` marker.
    pub domain_path: String,
    /// `ERROR_KEY` constants declared in the source file.
    pub error_keys: BTreeSet<String>,
}

/// A plugin as laid out in the content or playbook repository.
///
/// Each error key maps to the role tags found for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    /// Slash-joined domain path below the repository marker.
    pub domain_path: String,
    /// Error key to role tags.
    pub error_key_roles: BTreeMap<String, BTreeSet<String>>,
}

/// Content repository record.
pub type ContentRecord = RoleRecord;

/// Playbook repository record.
pub type PlaybookRecord = RoleRecord;

/// Read-only view the comparison engine needs from any record.
pub trait TaxonomyRecord {
    /// Whether records of this kind carry role tags per error key.
    const CARRIES_ROLES: bool;

    /// Domain path of the plugin.
    fn domain_path(&self) -> &str;

    /// Error keys of the plugin, sorted.
    fn error_keys(&self) -> BTreeSet<&str>;

    /// Role tags for `error_key`, or `None` when absent or roles are not tracked.
    fn roles(&self, error_key: &str) -> Option<&BTreeSet<String>>;
}

impl TaxonomyRecord for PluginRecord {
    const CARRIES_ROLES: bool = false;

    fn domain_path(&self) -> &str {
        &self.domain_path
    }

    fn error_keys(&self) -> BTreeSet<&str> {
        self.error_keys.iter().map(String::as_str).collect()
    }

    fn roles(&self, _error_key: &str) -> Option<&BTreeSet<String>> {
        None
    }
}

impl TaxonomyRecord for RoleRecord {
    const CARRIES_ROLES: bool = true;

    fn domain_path(&self) -> &str {
        &self.domain_path
    }

    fn error_keys(&self) -> BTreeSet<&str> {
        self.error_key_roles.keys().map(String::as_str).collect()
    }

    fn roles(&self, error_key: &str) -> Option<&BTreeSet<String>> {
        self.error_key_roles.get(error_key)
    }
}

/// Plugin name to record, iterated in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxonomyMap<R> {
    entries: BTreeMap<String, R>,
}

impl<R> Default for TaxonomyMap<R> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<R> TaxonomyMap<R> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a plugin by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&R> {
        self.entries.get(name)
    }

    /// Returns `true` if the plugin is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no plugin was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates plugins in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Inserts a record, replacing and returning any previous one.
    pub fn insert(&mut self, name: String, record: R) -> Option<R> {
        self.entries.insert(name, record)
    }

    pub(crate) fn entry_or_default(&mut self, name: &str) -> &mut R
    where
        R: Default,
    {
        self.entries.entry(name.to_string()).or_default()
    }
}

impl<R: TaxonomyRecord> TaxonomyMap<R> {
    /// Plugins whose domain path equals `domain`, in name order.
    pub fn in_domain<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = (&'a str, &'a R)> {
        self.iter().filter(move |(_, record)| record.domain_path() == domain)
    }
}

impl<R> FromIterator<(String, R)> for TaxonomyMap<R> {
    fn from_iter<I: IntoIterator<Item = (String, R)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
