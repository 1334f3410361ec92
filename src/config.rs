use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::entity::Policy;

const APP_PREFIX: &str = "sidx";

#[derive(Debug, Clone, Serialize, Deserialize, Default, Args)]
pub struct Config {
    /// The directory where downloaded sidebar scripts are cached.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    /// Whether to show progress bars.
    #[arg(long, global = true)]
    progress: Option<bool>,
    /// How long a downloaded script stays fresh. in seconds.
    #[arg(long, global = true)]
    update_interval: Option<u64>,
    /// Whether to download remote scripts even if the cached copy is fresh.
    #[serde(skip)]
    #[arg(short, long, global = true, num_args = 0..=1, default_missing_value = "true")]
    force: Option<bool>,
    /// Accept indexes that leave out some of the five categories.
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true")]
    allow_missing: Option<bool>,
    /// Log filter, in `RUST_LOG` syntax.
    #[arg(long, global = true)]
    log: Option<String>,
}

static DEFAULT_CACHE_DIR: LazyLock<PathBuf> = LazyLock::new(default_cache_dir);
fn default_cache_dir() -> PathBuf {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .map(|base_dir| base_dir.get_cache_home())
        .unwrap_or_else(|_| std::env::temp_dir().join(APP_PREFIX))
}

impl Config {
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir
            .as_deref()
            .unwrap_or(DEFAULT_CACHE_DIR.as_path())
    }

    pub fn progress(&self) -> bool {
        self.progress.unwrap_or(true)
    }

    pub fn update_interval(&self) -> u64 {
        self.update_interval.unwrap_or(60 * 60 * 24)
    }

    pub fn force(&self) -> bool {
        self.force.unwrap_or(false)
    }

    pub fn allow_missing(&self) -> bool {
        self.allow_missing.unwrap_or(false)
    }

    pub fn log(&self) -> Option<&str> {
        self.log.as_deref()
    }

    pub fn policy(&self) -> Policy {
        Policy {
            require_all_categories: !self.allow_missing(),
        }
    }

    /// Fields set in `other` win over the ones in `self`.
    pub fn extends(self, other: Config) -> Self {
        Self {
            cache_dir: other.cache_dir.or(self.cache_dir),
            progress: other.progress.or(self.progress),
            update_interval: other.update_interval.or(self.update_interval),
            force: other.force.or(self.force),
            allow_missing: other.allow_missing.or(self.allow_missing),
            log: other.log.or(self.log),
        }
    }

    /// Read `$XDG_CONFIG_HOME/sidx/config.toml`, or the defaults if there is none.
    pub fn load_from_file() -> anyhow::Result<Self> {
        let base_dir = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
        Self::load_from_path(&base_dir.get_config_file("config.toml"))
    }

    fn load_from_path(config_file: &Path) -> anyhow::Result<Self> {
        if config_file.exists() {
            let config = std::fs::read_to_string(config_file)?;
            let config = toml::from_str(&config)
                .map_err(|e| anyhow::anyhow!("Parse {}, err: {}", config_file.display(), e))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}
