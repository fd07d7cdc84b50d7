//! HTTP implementation of [`CompanySource`].
//!
//! Pages live at `{base_url}-{page}.json`, single companies at
//! `{base_url}/{id}.json`.

use std::time::Duration;

use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use roster_core::domain::{Company, PageResult};
use roster_core::error::{FetchError, Result};
use roster_core::source::CompanySource;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/companies";

#[derive(Clone, Debug)]
pub struct HttpCompanySource {
    client: Client,
    base_url: String,
}

impl HttpCompanySource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("client setup: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}-{}.json", self.base_url, page)
    }

    pub fn company_url(&self, id: &str) -> String {
        format!("{}/{}.json", self.base_url, urlencoding::encode(id))
    }

    /// `Ok(None)` on 404 so callers decide what a missing resource means.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<Option<T>, FetchError> {
        debug!(%url, "GET");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("{url}: {e}")))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!("{url}: HTTP {status}")));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("{url}: {e}")))?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| FetchError::Decode(format!("{url}: {e}")))
    }
}

impl CompanySource for HttpCompanySource {
    async fn fetch_page(&self, page: u32) -> std::result::Result<PageResult, FetchError> {
        let url = self.page_url(page);
        self.get_json(&url)
            .await?
            .ok_or_else(|| FetchError::Transport(format!("{url}: HTTP {}", StatusCode::NOT_FOUND)))
    }

    async fn fetch_company(&self, id: &str) -> std::result::Result<Company, FetchError> {
        let url = self.company_url(id);
        self.get_json(&url)
            .await?
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpCompanySource {
        HttpCompanySource::with_client(Client::new(), base)
    }

    #[test]
    fn urls_follow_the_static_layout() {
        let s = source("http://localhost:3000/api/companies/");
        assert_eq!(s.page_url(3), "http://localhost:3000/api/companies-3.json");
        assert_eq!(
            s.company_url("42"),
            "http://localhost:3000/api/companies/42.json"
        );
    }

    #[test]
    fn company_ids_are_escaped() {
        let s = source("http://h/api/companies");
        assert_eq!(s.company_url("a/b c"), "http://h/api/companies/a%2Fb%20c.json");
    }
}
