//! Watched configuration directory.
//!
//! Keeps an in-memory `file name → content` map of a directory (typically a
//! mounted ConfigMap) and republishes it whenever the directory changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Source of a point-in-time view over externally maintained config files.
pub trait SnapshotProvider: Send + Sync {
    /// Return a fresh copy of the current mapping.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// A watcher that mirrors the files of a directory into memory.
#[derive(Clone)]
pub struct ConfigDirWatcher {
    dir: PathBuf,
    files: Arc<ArcSwap<BTreeMap<String, String>>>,
}

impl ConfigDirWatcher {
    /// Create a watcher and load the directory's current contents.
    pub fn new(dir: &Path) -> Self {
        let watcher = Self {
            dir: dir.to_path_buf(),
            files: Arc::new(ArcSwap::from_pointee(BTreeMap::new())),
        };
        watcher.reload();
        watcher
    }

    /// Re-read the directory and publish the result.
    pub fn reload(&self) {
        match read_dir_contents(&self.dir) {
            Ok(files) => {
                tracing::debug!(path = ?self.dir, files = files.len(), "Config directory loaded");
                self.files.store(Arc::new(files));
            }
            Err(e) => {
                tracing::error!(path = ?self.dir, error = %e, "Failed to read config directory. Keeping previous contents.");
            }
        }
    }

    /// Start watching the directory in a background thread.
    ///
    /// The returned handle must be kept alive for as long as updates are wanted.
    pub fn run(&self) -> Result<RecommendedWatcher, notify::Error> {
        let this = self.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove() {
                        tracing::info!("Config directory change detected, reloading...");
                        this.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.dir, "Config watcher started");
        Ok(watcher)
    }
}

impl SnapshotProvider for ConfigDirWatcher {
    fn snapshot(&self) -> BTreeMap<String, String> {
        (**self.files.load()).clone()
    }
}

/// Read every regular file directly under `dir`.
///
/// Symlinks are followed; entries starting with `..` (the atomic-writer
/// bookkeeping of mounted volumes) and unreadable or non-UTF-8 files are
/// skipped.
fn read_dir_contents(dir: &Path) -> std::io::Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("..") {
            continue;
        }

        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            _ => continue,
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                files.insert(name, content);
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Skipping unreadable config file");
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_files_on_creation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), "replicas: 2\n").unwrap();
        fs::write(dir.path().join("feature"), "on").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::create_dir(dir.path().join("..data")).unwrap();

        let watcher = ConfigDirWatcher::new(dir.path());
        let snapshot = watcher.snapshot();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["app.yaml"], "replicas: 2\n");
        assert_eq!(snapshot["feature"], "on");
    }

    #[test]
    fn snapshot_is_detached_from_later_reloads() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "1").unwrap();

        let watcher = ConfigDirWatcher::new(dir.path());
        let before = watcher.snapshot();

        fs::write(dir.path().join("a"), "2").unwrap();
        fs::write(dir.path().join("b"), "3").unwrap();
        watcher.reload();

        assert_eq!(before.len(), 1);
        assert_eq!(before["a"], "1");

        let after = watcher.snapshot();
        assert_eq!(after["a"], "2");
        assert_eq!(after["b"], "3");
    }

    #[test]
    fn missing_directory_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = ConfigDirWatcher::new(&dir.path().join("absent"));
        assert!(watcher.snapshot().is_empty());
    }
}
