// src/fetch/cache.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// On-disk HTML cache keyed by URL.
///
/// Failures are logged and reported as misses; the cache never fails a fetch.
#[derive(Debug, Clone)]
pub struct HtmlCache {
    dir: PathBuf,
    ttl: Duration,
}

impl HtmlCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Same URL, same file name.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let key = Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes());
        self.dir.join(format!("{}.html", key))
    }

    pub async fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);

        let metadata = fs::metadata(&path).await.ok()?;
        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .unwrap_or(Duration::ZERO);

        if age >= self.ttl {
            debug!("Cache entry for {} is stale ({}s old)", url, age.as_secs());
            return None;
        }

        match fs::read_to_string(&path).await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn put(&self, url: &str, html: &str) {
        if let Err(e) = self.write_entry(url, html).await {
            warn!("Failed to cache {}: {:#}", url, e);
        }
    }

    async fn write_entry(&self, url: &str, html: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", self.dir.display()))?;

        let path = self.entry_path(url);
        fs::write(&path, html)
            .await
            .with_context(|| format!("Failed to write cache entry: {}", path.display()))?;

        debug!("Cached {} at {}", url, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_path_is_deterministic() {
        let cache = HtmlCache::new("/tmp/cache", Duration::from_secs(60));
        let a = cache.entry_path("https://example.com/jobs/1");
        let b = cache.entry_path("https://example.com/jobs/1");
        let c = cache.entry_path("https://example.com/jobs/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("html"));
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let temp = TempDir::new().unwrap();
        let cache = HtmlCache::new(temp.path().join("html"), Duration::from_secs(3600));

        assert_eq!(cache.get("https://example.com/a").await, None);
        cache.put("https://example.com/a", "<h1>A</h1>").await;
        assert_eq!(
            cache.get("https://example.com/a").await.as_deref(),
            Some("<h1>A</h1>")
        );
    }

    #[tokio::test]
    async fn test_stale_entries_are_misses() {
        let temp = TempDir::new().unwrap();
        let cache = HtmlCache::new(temp.path(), Duration::ZERO);

        cache.put("https://example.com/a", "<h1>A</h1>").await;
        assert!(cache.entry_path("https://example.com/a").exists());
        assert_eq!(cache.get("https://example.com/a").await, None);
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let cache = HtmlCache::new(&blocker, Duration::from_secs(60));
        cache.put("https://example.com/a", "<p>x</p>").await;
        assert_eq!(cache.get("https://example.com/a").await, None);
    }
}
