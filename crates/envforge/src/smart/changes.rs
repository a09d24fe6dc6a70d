//! Changed files since a baseline revision.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeVerb {
    Modified,
    Added,
    Deleted,
}

impl ChangeVerb {
    /// Maps a git status letter onto a verb.
    ///
    /// Only deletions and additions are distinguished; type changes, copies and
    /// unmerged entries count as modifications.
    pub fn from_status_code(code: char) -> Self {
        match code {
            'D' => ChangeVerb::Deleted,
            'A' | '?' => ChangeVerb::Added,
            _ => ChangeVerb::Modified,
        }
    }

    pub fn code(&self) -> char {
        match self {
            ChangeVerb::Modified => 'M',
            ChangeVerb::Added => 'A',
            ChangeVerb::Deleted => 'D',
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ChangeVerb::Deleted)
    }
}

impl fmt::Display for ChangeVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Repository-relative path to change verb, one verb per path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFiles(BTreeMap<String, ChangeVerb>);

impl ChangedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change; a later entry for the same path replaces the earlier one.
    pub fn insert(&mut self, path: impl Into<String>, verb: ChangeVerb) {
        self.0.insert(path.into(), verb);
    }

    /// Overlays `other` on top of `self`.
    pub fn merge(&mut self, other: ChangedFiles) {
        self.0.extend(other.0);
    }

    pub fn get(&self, path: &str) -> Option<ChangeVerb> {
        self.0.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeVerb)> {
        self.0.iter().map(|(path, verb)| (path.as_str(), *verb))
    }
}

impl<S: Into<String>> FromIterator<(S, ChangeVerb)> for ChangedFiles {
    fn from_iter<I: IntoIterator<Item = (S, ChangeVerb)>>(iter: I) -> Self {
        let mut files = ChangedFiles::new();
        for (path, verb) in iter {
            files.insert(path, verb);
        }
        files
    }
}

impl IntoIterator for ChangedFiles {
    type Item = (String, ChangeVerb);
    type IntoIter = btree_map::IntoIter<String, ChangeVerb>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
