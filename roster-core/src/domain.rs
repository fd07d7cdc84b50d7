// roster_core/src/domain.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Any other descriptive fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website: None,
            city: None,
            extra: Map::new(),
        }
    }
}

/// A company plus its derived visibility. `visible` is never written back
/// into the persisted record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedCompany {
    #[serde(flatten)]
    pub company: Company,
    pub visible: bool,
}

impl AnnotatedCompany {
    pub fn new(company: Company, visible: bool) -> Self {
        Self { company, visible }
    }

    pub fn id(&self) -> &str {
        &self.company.id
    }
}

/// One page as served by the companies endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub count: u64,
    #[serde(default)]
    pub has_more: bool,
    pub page: u32,
    pub results: Vec<Company>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompanyDetail {
    pub company: Company,
    pub visible: bool,
}
