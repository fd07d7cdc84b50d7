use roster_core::error::{FetchError, Result};
use roster_core::session::{CompaniesState, LoadStatus, Session};
use roster_core::store::StoreParams;
use roster_core::store_factory::{Backend, open_store};
use roster_core::{AnnotatedCompany, CompanyDetail, FilterMode};
use roster_http::HttpCompanySource;

use crate::config::Config;

const NOT_SPECIFIED: &str = "not specified";

fn session_from_config(cfg: &Config) -> Result<Session<HttpCompanySource>> {
    let store = open_store(
        Backend::Fs,
        StoreParams {
            state_dir: cfg.state_dir.clone(),
        },
    )?;
    let source = HttpCompanySource::new(&cfg.base_url, cfg.timeout)?;
    Ok(Session::open(store, source))
}

fn status_word(visible: bool) -> &'static str {
    if visible { "visible" } else { "hidden" }
}

fn failure(state: &CompaniesState) -> Option<FetchError> {
    match &state.status {
        LoadStatus::Failed(e) => Some(e.clone()),
        _ => None,
    }
}

pub fn render_rows(rows: &[&AnnotatedCompany]) -> String {
    let mut out = format!("{:<12} {:<40} {}\n", "ID", "NAME", "STATUS");
    for c in rows {
        out.push_str(&format!(
            "{:<12} {:<40} {}\n",
            c.company.id,
            c.company.name,
            status_word(c.visible)
        ));
    }
    out
}

pub fn render_detail(detail: &CompanyDetail) -> String {
    let c = &detail.company;
    let mut out = format!("{}\n", c.name);
    out.push_str(&format!("  id:      {}\n", c.id));
    out.push_str(&format!("  status:  {}\n", status_word(detail.visible)));
    out.push_str(&format!(
        "  website: {}\n",
        c.website.as_deref().unwrap_or(NOT_SPECIFIED)
    ));
    out.push_str(&format!(
        "  city:    {}\n",
        c.city.as_deref().unwrap_or(NOT_SPECIFIED)
    ));
    out
}

pub async fn handle_list(cfg: &Config, page: u32, filter: Option<FilterMode>) -> Result<()> {
    let mut session = session_from_config(cfg)?;
    if let Some(mode) = filter {
        session.set_filter(mode)?;
    }
    let state = session.load_page(page).await;
    if let Some(e) = failure(state) {
        return Err(e.into());
    }
    let (total, shown_page, has_more) = (state.total_results, state.page, state.has_more);

    let rows = session.rows();
    print!("{}", render_rows(&rows));
    eprintln!(
        "page {shown_page}: {} of {} listed ({total} total, filter={}){}",
        rows.len(),
        session.state().companies.len(),
        session.filter(),
        if has_more { ", more pages available" } else { "" }
    );
    Ok(())
}

pub async fn handle_show(cfg: &Config, id: String) -> Result<()> {
    let mut session = session_from_config(cfg)?;
    let state = session.load_company(&id).await;
    match (&state.status, &state.company) {
        (LoadStatus::Loaded, Some(detail)) => {
            print!("{}", render_detail(detail));
            Ok(())
        }
        (LoadStatus::Failed(e), _) => Err(e.clone().into()),
        _ => {
            println!("This company doesn't exist");
            Ok(())
        }
    }
}

pub fn handle_toggle(cfg: &Config, id: String) -> Result<()> {
    let mut session = session_from_config(cfg)?;
    let visible = session.toggle(&id)?;
    println!("{id}: {}", status_word(visible));
    Ok(())
}

pub fn handle_filter(cfg: &Config, mode: FilterMode) -> Result<()> {
    let mut session = session_from_config(cfg)?;
    session.set_filter(mode)?;
    eprintln!("filter: {mode}");
    Ok(())
}

pub fn handle_show_all(cfg: &Config) -> Result<()> {
    let mut session = session_from_config(cfg)?;
    let count = session.hidden().len();
    session.set_all_visible()?;
    eprintln!("show-all: {count} companies visible again");
    Ok(())
}

pub fn handle_hidden(cfg: &Config) -> Result<()> {
    let session = session_from_config(cfg)?;
    for id in session.hidden().to_sorted_vec() {
        println!("{id}");
    }
    Ok(())
}
