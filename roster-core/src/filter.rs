use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::AnnotatedCompany;
use crate::error::{ParseFilterModeError, Result};
use crate::store::KeyValueStore;

/// Store key holding the selected filter mode.
pub const VIEW_KEY: &str = "view";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    All,
    #[default]
    OnlyVisible,
    OnlyHidden,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::OnlyVisible => "onlyVisible",
            FilterMode::OnlyHidden => "onlyHidden",
        }
    }

    pub fn admits(self, company: &AnnotatedCompany) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::OnlyVisible => company.visible,
            FilterMode::OnlyHidden => !company.visible,
        }
    }

    /// Persisted preference, or the default when absent or unrecognised.
    /// Accepts both the JSON-string form and a bare token.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(VIEW_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("reading {VIEW_KEY} failed, using default: {e}");
                return Self::default();
            }
        };
        serde_json::from_str::<FilterMode>(&raw)
            .ok()
            .or_else(|| raw.trim().parse().ok())
            .unwrap_or_else(|| {
                warn!(value = %raw, "unrecognised {VIEW_KEY}, using default");
                Self::default()
            })
    }

    pub fn persist(self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(VIEW_KEY, &serde_json::to_string(&self)?)
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterMode::All),
            "onlyVisible" | "only-visible" | "visible" => Ok(FilterMode::OnlyVisible),
            "onlyHidden" | "only-hidden" | "hidden" => Ok(FilterMode::OnlyHidden),
            other => Err(ParseFilterModeError(other.to_string())),
        }
    }
}

/// The displayed subsequence of an annotated list, order preserved.
pub fn filter_view(
    list: &[AnnotatedCompany],
    mode: FilterMode,
) -> impl Iterator<Item = &AnnotatedCompany> {
    list.iter().filter(move |c| mode.admits(c))
}
