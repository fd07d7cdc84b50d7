use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::KeyValueStore;

/// Store key holding the JSON array of hidden company ids.
pub const HIDDEN_KEY: &str = "hiddenCompanies";

/// Ids of the companies the user chose to hide. Absence means visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    hidden: HashSet<String>,
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted set. A missing, unreadable or wrongly shaped value
    /// yields the empty set.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(HIDDEN_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                warn!("reading {HIDDEN_KEY} failed, assuming nothing hidden: {e}");
                return Self::new();
            }
        };
        Self::decode(&raw).unwrap_or_else(|| {
            warn!("{HIDDEN_KEY} is not an array of strings, assuming nothing hidden");
            Self::new()
        })
    }

    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str::<Vec<String>>(raw)
            .ok()
            .map(|ids| ids.into_iter().collect())
    }

    /// Write the set back. The empty set removes the key.
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        if self.hidden.is_empty() {
            debug!("no hidden companies, removing {HIDDEN_KEY}");
            return store.remove(HIDDEN_KEY);
        }
        let body = serde_json::to_string(&self.to_sorted_vec())?;
        store.set(HIDDEN_KEY, &body)
    }

    /// Post-toggle membership: `id` removed if hidden, added otherwise.
    pub fn toggle(&self, id: &str) -> Self {
        let mut next = self.clone();
        if !next.hidden.remove(id) {
            next.hidden.insert(id.to_string());
        }
        next
    }

    pub fn clear(&mut self) {
        self.hidden.clear();
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.hidden.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<String> for VisibilitySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            hidden: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for VisibilitySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}
