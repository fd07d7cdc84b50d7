pub mod handlers;

use crate::config::Config;
use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use roster_core::error::Result;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load().with_overrides(cli.base_url, cli.state_dir, cli.timeout_secs);
    match cli.command {
        Commands::List { page, filter } => handlers::handle_list(&cfg, page, filter).await,
        Commands::Show { id } => handlers::handle_show(&cfg, id).await,
        Commands::Toggle { id } => handlers::handle_toggle(&cfg, id),
        Commands::Filter { mode } => handlers::handle_filter(&cfg, mode),
        Commands::ShowAll => handlers::handle_show_all(&cfg),
        Commands::Hidden => handlers::handle_hidden(&cfg),
    }
}
