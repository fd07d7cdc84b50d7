// roster_core/src/source.rs
use std::future::Future;

use crate::domain::{Company, PageResult};
use crate::error::FetchError;

/// Where companies come from. Pages are numbered from 1.
pub trait CompanySource: Send + Sync {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<PageResult, FetchError>> + Send;

    /// `FetchError::NotFound` when no company has this id.
    fn fetch_company(&self, id: &str)
    -> impl Future<Output = Result<Company, FetchError>> + Send;
}
