use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use roster_http::DEFAULT_BASE_URL;
use tracing::{debug, warn};

const STATE_DIR_NAME: &str = "roster";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub state_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: try_load(&lookup, "ROSTER_BASE_URL", DEFAULT_BASE_URL.to_string()),
            state_dir: lookup("ROSTER_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_state_dir),
            timeout: Duration::from_secs(try_load(
                &lookup,
                "ROSTER_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        state_dir: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(dir) = state_dir {
            self.state_dir = dir;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

/// Per-user data directory, so the hidden set does not depend on the
/// working directory.
fn default_state_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join(STATE_DIR_NAME),
        None => {
            warn!("no per-user data directory, using ./.{STATE_DIR_NAME}");
            PathBuf::from(format!(".{STATE_DIR_NAME}"))
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        debug!("{key} not set, using default: {default}");
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(e) => {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }
    }
}
