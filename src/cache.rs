use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{config::Config, utils::write_atomic};

const META_FILE: &str = "meta.json";

/// Tracks when each cached download was fetched.
#[derive(Debug)]
pub struct CachesManager {
    root: PathBuf,
    meta: CacheMeta,
    update_interval: Duration,
    force: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CacheMeta {
    /// cache key -> seconds since the epoch
    last_modified: BTreeMap<String, u64>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl CachesManager {
    pub async fn new(opts: &Config) -> Self {
        let root = opts.cache_dir().to_path_buf();
        let metafile = root.join(META_FILE);

        let meta = match tokio::fs::read_to_string(&metafile).await {
            Ok(meta) => serde_json::from_str(&meta).unwrap_or_else(|e| {
                warn!(path = %metafile.display(), error = %e, "discarding unreadable cache metadata");
                CacheMeta::default()
            }),
            Err(_) => CacheMeta::default(),
        };

        Self {
            root,
            meta,
            update_interval: Duration::from_secs(opts.update_interval()),
            force: opts.force(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn should_refresh(&self, key: &str) -> bool {
        if self.force {
            return true;
        }
        let Some(&last_modified) = self.meta.last_modified.get(key) else {
            return true;
        };
        let age = now_secs().saturating_sub(last_modified);
        Duration::from_secs(age) > self.update_interval
    }

    /// Record `key` as fetched just now and persist the metadata.
    pub async fn mark_fresh(&mut self, key: &str) -> anyhow::Result<()> {
        self.meta.last_modified.insert(key.to_string(), now_secs());
        self.flush_meta().await
    }

    async fn flush_meta(&self) -> anyhow::Result<()> {
        let meta = serde_json::to_string(&self.meta)?;
        write_atomic(&self.root.join(META_FILE), meta).await
    }
}
