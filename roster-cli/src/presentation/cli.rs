use clap::{Parser, Subcommand};
use roster_core::FilterMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "roster: browse companies, hide the ones you don't care about", long_about = None)]
pub struct Cli {
    /// Companies endpoint prefix (overrides ROSTER_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding persisted preferences (overrides ROSTER_STATE_DIR)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides ROSTER_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of companies, hidden ones first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// all, only-visible or only-hidden; defaults to the saved preference
        #[arg(long)]
        filter: Option<FilterMode>,
    },

    /// Show a single company
    Show { id: String },

    /// Hide a visible company, or show a hidden one
    Toggle { id: String },

    /// Save the filter mode used by `list`
    Filter { mode: FilterMode },

    /// Make every company visible again
    ShowAll,

    /// Print the ids currently hidden
    Hidden,
}
