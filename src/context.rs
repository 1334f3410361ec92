use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::{Client, Response, Url};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::{
    cache::CachesManager,
    config::Config,
    entity::{Policy, SidebarDocument},
    progress::{ProgressBar, ProgressBarManager},
    source::{cache_key, Source},
    utils::write_atomic,
};

const SOURCES_DIR: &str = "sources";

#[derive(Debug)]
pub struct Context {
    /// The configuration.
    pub config: Config,
    /// The HTTP client.
    pub client: Client,
    /// The caches.
    pub caches: CachesManager,
    /// The progress bar.
    pub bar: ProgressBarManager,
}

impl Context {
    /// Create a new context.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sidx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let caches = CachesManager::new(&config).await;
        let bar = ProgressBarManager::new(&config);

        Ok(Self {
            config,
            client,
            caches,
            bar,
        })
    }

    pub fn policy(&self) -> Policy {
        self.config.policy()
    }

    /// Read and parse a sidebar script.
    pub async fn load_document(&mut self, source: &Source) -> anyhow::Result<SidebarDocument> {
        let text = self.read_source(source).await?;
        self.load_document_from_text(source, &text)
    }

    pub fn load_document_from_text(
        &self,
        source: &Source,
        text: &str,
    ) -> anyhow::Result<SidebarDocument> {
        SidebarDocument::parse(text, self.policy()).with_context(|| format!("Parse {}", source))
    }

    pub async fn read_source(&mut self, source: &Source) -> anyhow::Result<String> {
        match source {
            Source::Stdin => {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Ok(text)
            }
            Source::Path(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Read {}", path.display())),
            Source::Url(url) => self.fetch(url).await,
        }
    }

    async fn fetch(&mut self, url: &Url) -> anyhow::Result<String> {
        let key = cache_key(url);
        let filename = Path::new(SOURCES_DIR).join(&key);

        if self.cache_file_exists(&filename) && !self.caches.should_refresh(&key) {
            debug!(%url, "using cached copy");
            return self.read_from_cache(&filename).await;
        }

        info!(%url, "downloading");
        let pb = self.bar.add();
        pb.set_message(format!("Downloading {}", url));
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let payload = self.download_with_progress(response, &pb).await?;
        pb.finish(format!("Downloaded {}", url));

        let text = String::from_utf8(payload.to_vec())
            .map_err(|e| anyhow::anyhow!("Decode {}, err: {}", url, e))?;
        self.write_to_cache(&filename, &text)
            .await
            .map_err(|e| anyhow::anyhow!("Write {}, err: {}", filename.display(), e))?;
        self.caches.mark_fresh(&key).await?;
        Ok(text)
    }

    pub async fn download_with_progress(
        &self,
        response: Response,
        pb: &ProgressBar,
    ) -> anyhow::Result<Bytes> {
        let total_size = response.content_length();
        pb.update_template(total_size);

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        let mut payload = BytesMut::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            downloaded += chunk.len() as u64;
            payload.extend_from_slice(&chunk);
            pb.set_position(downloaded);
        }

        Ok(payload.freeze())
    }

    pub fn cache_file_exists<F>(&self, filename: F) -> bool
    where
        F: AsRef<Path>,
    {
        self.build_cache_path(filename).exists()
    }

    pub fn build_cache_path<F>(&self, filename: F) -> PathBuf
    where
        F: AsRef<Path>,
    {
        self.caches.root().join(filename)
    }

    pub async fn read_from_cache<F>(&self, filename: F) -> anyhow::Result<String>
    where
        F: AsRef<Path>,
    {
        let cache_path = self.build_cache_path(filename);
        tokio::fs::read_to_string(&cache_path)
            .await
            .with_context(|| format!("Read {}", cache_path.display()))
    }

    /// Write through a sibling temporary file so readers never see a partial script.
    pub async fn write_to_cache<F>(&self, filename: F, text: &str) -> anyhow::Result<()>
    where
        F: AsRef<Path>,
    {
        write_atomic(&self.build_cache_path(filename), text).await
    }
}

/// A context caching under `dir`, without progress bars.
#[cfg(test)]
pub async fn test_context(dir: &Path, extra_config: &str) -> Context {
    let config: Config = toml::from_str(&format!(
        "cache_dir = {:?}\nprogress = false\n{}",
        dir.display().to_string(),
        extra_config
    ))
    .unwrap();
    Context::new(config).await.unwrap()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entity::{fixture::sidebar_script, Category, Envelope};

    async fn context(dir: &Path) -> Context {
        test_context(dir, "").await
    }

    #[tokio::test]
    async fn loads_a_document_from_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("sidebar-items.js");
        std::fs::write(&script, sidebar_script()).unwrap();

        let mut context = context(dir.path()).await;
        let doc = context.load_document(&Source::Path(script)).await.unwrap();
        assert_eq!(doc.envelope, Envelope::InitCall);
        assert_eq!(doc.index.section(Category::Mod).unwrap().items.len(), 4);
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = context(dir.path()).await;
        let err = context
            .load_document(&Source::Path(dir.path().join("nope.js")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope.js"));
    }

    #[tokio::test]
    async fn cached_downloads_are_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = context(dir.path()).await;
        let url = Url::parse("https://docs.rs/dynasmrt/latest/dynasmrt/sidebar-items.js").unwrap();
        let key = cache_key(&url);

        context
            .write_to_cache(Path::new(SOURCES_DIR).join(&key), &sidebar_script())
            .await
            .unwrap();
        context.caches.mark_fresh(&key).await.unwrap();

        let text = context.read_source(&Source::Url(url)).await.unwrap();
        assert_eq!(text, sidebar_script());
    }
}
