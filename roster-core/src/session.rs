use tracing::{debug, info, warn};

use crate::domain::{AnnotatedCompany, Company, CompanyDetail, PageResult};
use crate::error::{FetchError, Result};
use crate::filter::{FilterMode, filter_view};
use crate::reconcile::reconcile;
use crate::source::CompanySource;
use crate::store::KeyValueStore;
use crate::visibility::VisibilitySet;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FetchError),
    NotFound,
}

/// What the presentation layer reads.
#[derive(Clone, Debug, Default)]
pub struct CompaniesState {
    pub status: LoadStatus,
    pub companies: Vec<AnnotatedCompany>,
    pub company: Option<CompanyDetail>,
    pub total_results: u64,
    pub page: u32,
    pub has_more: bool,
}

impl CompaniesState {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    pub fn has_errors(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_) | LoadStatus::NotFound)
    }
}

/// Issued per page request. Only the most recent ticket may apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTicket {
    pub page: u32,
    generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyTicket {
    pub id: String,
    generation: u64,
}

pub struct Session<S> {
    store: Box<dyn KeyValueStore>,
    source: S,
    hidden: VisibilitySet,
    filter: FilterMode,
    state: CompaniesState,
    // last page as served, so toggles can re-partition without a refetch
    fetched: Vec<Company>,
    // bumped on every request; pages and details share it since they share state
    generation: u64,
}

impl<S: CompanySource> Session<S> {
    pub fn open(store: Box<dyn KeyValueStore>, source: S) -> Self {
        let hidden = VisibilitySet::load(store.as_ref());
        let filter = FilterMode::load(store.as_ref());
        debug!(hidden = hidden.len(), %filter, "session opened");
        Self {
            store,
            source,
            hidden,
            filter,
            state: CompaniesState::default(),
            fetched: Vec::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &CompaniesState {
        &self.state
    }

    pub fn hidden(&self) -> &VisibilitySet {
        &self.hidden
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rows to display under the current filter mode.
    pub fn rows(&self) -> Vec<&AnnotatedCompany> {
        filter_view(&self.state.companies, self.filter).collect()
    }

    pub fn begin_page(&mut self, page: u32) -> PageTicket {
        self.generation += 1;
        self.state.status = LoadStatus::Loading;
        PageTicket {
            page: page.max(1),
            generation: self.generation,
        }
    }

    /// Apply a finished page fetch. Returns false when a newer request has
    /// been issued since `ticket`, in which case nothing changes.
    pub fn complete_page(
        &mut self,
        ticket: PageTicket,
        result: std::result::Result<PageResult, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(page = ticket.page, "discarding stale page result");
            return false;
        }
        match result {
            Ok(page) => {
                info!(page = page.page, items = page.results.len(), total = page.count, "page loaded");
                self.fetched = page.results;
                self.rebuild();
                self.state.total_results = page.count;
                self.state.page = page.page;
                self.state.has_more = page.has_more;
                self.state.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!(page = ticket.page, "page fetch failed: {e}");
                self.fetched.clear();
                self.state.companies.clear();
                self.state.page = ticket.page;
                self.state.has_more = false;
                self.state.status = LoadStatus::Failed(e);
            }
        }
        true
    }

    pub async fn load_page(&mut self, page: u32) -> &CompaniesState {
        let ticket = self.begin_page(page);
        let result = self.source.fetch_page(ticket.page).await;
        self.complete_page(ticket, result);
        &self.state
    }

    pub fn begin_company(&mut self, id: &str) -> CompanyTicket {
        self.generation += 1;
        self.state.status = LoadStatus::Loading;
        CompanyTicket {
            id: id.to_string(),
            generation: self.generation,
        }
    }

    pub fn complete_company(
        &mut self,
        ticket: CompanyTicket,
        result: std::result::Result<Company, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(id = %ticket.id, "discarding stale company result");
            return false;
        }
        match result {
            Ok(company) => {
                let visible = !self.hidden.is_hidden(&company.id);
                debug!(id = %company.id, visible, "company loaded");
                self.state.company = Some(CompanyDetail { company, visible });
                self.state.status = LoadStatus::Loaded;
            }
            Err(FetchError::NotFound(id)) => {
                info!(%id, "company does not exist");
                self.state.company = None;
                self.state.status = LoadStatus::NotFound;
            }
            Err(e) => {
                warn!(id = %ticket.id, "company fetch failed: {e}");
                self.state.company = None;
                self.state.status = LoadStatus::Failed(e);
            }
        }
        true
    }

    pub async fn load_company(&mut self, id: &str) -> &CompaniesState {
        let ticket = self.begin_company(id);
        let result = self.source.fetch_company(&ticket.id).await;
        self.complete_company(ticket, result);
        &self.state
    }

    fn rebuild(&mut self) {
        self.state.companies = reconcile(self.fetched.iter().cloned(), &self.hidden);
    }

    /// Flip one company's visibility and persist it right away, then
    /// re-partition the current page. Returns the new visibility.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let next = self.hidden.toggle(id);
        next.persist(self.store.as_mut())?;
        self.hidden = next;
        self.rebuild();

        let visible = !self.hidden.is_hidden(id);
        if let Some(detail) = self.state.company.as_mut().filter(|d| d.company.id == id) {
            detail.visible = visible;
        }
        info!(id, visible, "visibility toggled");
        Ok(visible)
    }

    pub fn set_all_visible(&mut self) -> Result<()> {
        let cleared = VisibilitySet::new();
        cleared.persist(self.store.as_mut())?;
        self.hidden = cleared;
        self.rebuild();

        if let Some(detail) = self.state.company.as_mut() {
            detail.visible = true;
        }
        info!("all companies visible");
        Ok(())
    }

    pub fn set_filter(&mut self, mode: FilterMode) -> Result<()> {
        mode.persist(self.store.as_mut())?;
        self.filter = mode;
        info!(filter = %mode, "filter changed");
        Ok(())
    }

    /// Drop the request status, keeping loaded data.
    pub fn reset(&mut self) {
        self.state.status = LoadStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::store::StoreParams;
    use crate::store_factory::{Backend, open_store};
    use crate::store_mem::MemoryStore;
    use crate::visibility::HIDDEN_KEY;

    #[derive(Default)]
    struct FixtureSource {
        pages: HashMap<u32, PageResult>,
        companies: HashMap<String, Company>,
    }

    impl FixtureSource {
        fn new() -> Self {
            let mut src = Self::default();
            let page1 = vec![
                Company::new("a", "Alpha"),
                Company::new("b", "Beta"),
                Company::new("c", "Gamma"),
            ];
            let page2 = vec![Company::new("d", "Delta")];
            for c in page1.iter().chain(page2.iter()) {
                src.companies.insert(c.id.clone(), c.clone());
            }
            src.pages.insert(1, PageResult { count: 4, has_more: true, page: 1, results: page1 });
            src.pages.insert(2, PageResult { count: 4, has_more: false, page: 2, results: page2 });
            src
        }
    }

    impl CompanySource for FixtureSource {
        async fn fetch_page(&self, page: u32) -> std::result::Result<PageResult, FetchError> {
            self.pages
                .get(&page)
                .cloned()
                .ok_or_else(|| FetchError::Transport(format!("HTTP 404 for page {page}")))
        }

        async fn fetch_company(&self, id: &str) -> std::result::Result<Company, FetchError> {
            self.companies
                .get(id)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(id.to_string()))
        }
    }

    fn session_with(store: MemoryStore) -> Session<FixtureSource> {
        Session::open(Box::new(store), FixtureSource::new())
    }

    fn listed(session: &Session<FixtureSource>) -> Vec<(&str, bool)> {
        session.state().companies.iter().map(|c| (c.id(), c.visible)).collect()
    }

    #[tokio::test]
    async fn page_load_reconciles_with_persisted_set() {
        let store = MemoryStore::new().with_entry(HIDDEN_KEY, r#"["b"]"#);
        let mut session = session_with(store);
        let state = session.load_page(1).await;
        assert!(state.is_success());
        assert_eq!(state.total_results, 4);
        assert!(state.has_more);
        assert_eq!(listed(&session), vec![("b", false), ("a", true), ("c", true)]);
    }

    #[tokio::test]
    async fn rows_follow_the_filter_mode() {
        let store = MemoryStore::new().with_entry(HIDDEN_KEY, r#"["b"]"#);
        let mut session = session_with(store);
        session.load_page(1).await;

        // default filter hides hidden rows
        let ids: Vec<&str> = session.rows().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        session.set_filter(FilterMode::OnlyHidden).unwrap();
        let ids: Vec<&str> = session.rows().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b"]);

        session.set_filter(FilterMode::All).unwrap();
        assert_eq!(session.rows().len(), 3);
    }

    #[tokio::test]
    async fn toggle_repartitions_without_refetch() {
        let mut session = session_with(MemoryStore::new());
        session.load_page(1).await;

        assert!(!session.toggle("c").unwrap());
        assert_eq!(listed(&session), vec![("c", false), ("a", true), ("b", true)]);
        assert!(session.hidden().is_hidden("c"));

        session.set_filter(FilterMode::All).unwrap();
        let ids: Vec<&str> = session.rows().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        // showing it again restores the served order
        assert!(session.toggle("c").unwrap());
        assert!(session.hidden().is_empty());
        assert_eq!(listed(&session), vec![("a", true), ("b", true), ("c", true)]);
    }

    #[tokio::test]
    async fn toggle_matches_a_fresh_load() {
        let mut session = session_with(MemoryStore::new());
        session.load_page(1).await;
        session.toggle("b").unwrap();
        session.toggle("c").unwrap();
        let after_toggle = session.state().companies.clone();

        session.load_page(1).await;
        assert_eq!(session.state().companies, after_toggle);
    }

    #[tokio::test]
    async fn toggle_of_unlisted_id_still_hides_it() {
        let mut session = session_with(MemoryStore::new());
        assert!(!session.toggle("zzz").unwrap());
        assert!(session.hidden().is_hidden("zzz"));
    }

    #[tokio::test]
    async fn hidden_set_and_filter_survive_a_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let params = StoreParams {
            state_dir: dir.path().to_path_buf(),
        };

        let store = open_store(Backend::Fs, params.clone()).unwrap();
        let mut session = Session::open(store, FixtureSource::new());
        session.toggle("a").unwrap();
        session.toggle("c").unwrap();
        session.set_filter(FilterMode::OnlyHidden).unwrap();
        drop(session);

        let store = open_store(Backend::Fs, params).unwrap();
        let mut session = Session::open(store, FixtureSource::new());
        assert_eq!(session.filter(), FilterMode::OnlyHidden);
        session.load_page(1).await;
        assert_eq!(listed(&session), vec![("a", false), ("c", false), ("b", true)]);
    }

    #[tokio::test]
    async fn set_all_visible_clears_everything() {
        let store = MemoryStore::new().with_entry(HIDDEN_KEY, r#"["a","b"]"#);
        let mut session = session_with(store);
        session.load_page(1).await;
        session.set_all_visible().unwrap();

        assert!(session.hidden().is_empty());
        assert!(session.state().companies.iter().all(|c| c.visible));
        assert_eq!(listed(&session), vec![("a", true), ("b", true), ("c", true)]);
    }

    #[tokio::test]
    async fn failed_page_is_empty_and_flagged() {
        let mut session = session_with(MemoryStore::new());
        session.load_page(1).await;
        let state = session.load_page(9).await;
        assert!(state.companies.is_empty());
        assert!(state.has_errors());
        assert!(matches!(state.status, LoadStatus::Failed(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn stale_page_result_is_discarded() {
        let mut session = session_with(MemoryStore::new());
        let first = session.begin_page(1);
        let second = session.begin_page(2);

        let r2 = session.source().fetch_page(second.page).await;
        assert!(session.complete_page(second, r2));
        let r1 = session.source().fetch_page(first.page).await;
        assert!(!session.complete_page(first, r1));

        assert_eq!(session.state().page, 2);
        assert_eq!(listed(&session), vec![("d", true)]);
    }

    #[tokio::test]
    async fn page_zero_is_clamped() {
        let mut session = session_with(MemoryStore::new());
        let ticket = session.begin_page(0);
        assert_eq!(ticket.page, 1);
    }

    #[tokio::test]
    async fn company_detail_carries_visibility() {
        let store = MemoryStore::new().with_entry(HIDDEN_KEY, r#"["d"]"#);
        let mut session = session_with(store);
        let state = session.load_company("d").await;
        let detail = state.company.as_ref().unwrap();
        assert_eq!(detail.company.name, "Delta");
        assert!(!detail.visible);

        assert!(session.toggle("d").unwrap());
        assert!(session.state().company.as_ref().unwrap().visible);
    }

    #[tokio::test]
    async fn missing_company_is_not_a_transport_failure() {
        let mut session = session_with(MemoryStore::new());
        let state = session.load_company("nope").await;
        assert_eq!(state.status, LoadStatus::NotFound);
        assert!(state.company.is_none());
    }

    #[tokio::test]
    async fn reset_returns_to_idle() {
        let mut session = session_with(MemoryStore::new());
        session.load_page(1).await;
        session.reset();
        assert_eq!(session.state().status, LoadStatus::Idle);
        assert_eq!(session.state().companies.len(), 3);
    }
}
