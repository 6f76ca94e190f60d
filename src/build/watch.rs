//! File watching for automatic rebuilds.
//!
//! Uses `notify-debouncer-full` to watch the content, templates and static
//! directories plus the config file for changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{
    Config as NotifyConfig, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher,
};
use notify_debouncer_full::{
    DebounceEventResult, Debouncer, RecommendedCache, new_debouncer, new_debouncer_opt,
};

use crate::config::WatchConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),
}

// =============================================================================
// Watch events
// =============================================================================

/// What kind of input changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// An article, author or game file.
    Content(PathBuf),
    /// A template, layout or partial.
    Template(PathBuf),
    /// A file copied verbatim to the output.
    Static(PathBuf),
    /// The config file itself.
    Config,
}

/// Events sent from the file watcher.
#[derive(Debug)]
pub enum WatchEvent {
    /// Files changed, rebuild needed.
    FilesChanged(Vec<ChangeKind>),
    /// Watcher error occurred.
    Error(String),
}

// =============================================================================
// Path classification
// =============================================================================

/// Paths to watch for changes.
#[derive(Debug, Clone)]
pub struct WatchPaths {
    pub content_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub config_path: PathBuf,
}

impl WatchPaths {
    /// Canonicalize every path that exists so it matches the paths in
    /// file events.
    pub fn new(
        content_dir: PathBuf,
        templates_dir: PathBuf,
        static_dir: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        let canonical = |path: PathBuf| path.canonicalize().unwrap_or(path);
        Self {
            content_dir: canonical(content_dir),
            templates_dir: canonical(templates_dir),
            static_dir: canonical(static_dir),
            config_path: canonical(config_path),
        }
    }

    /// Classify a changed path into a ChangeKind.
    pub fn classify(&self, path: &Path) -> Option<ChangeKind> {
        // Skip hidden files and directories
        if path
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            return None;
        }

        if path == self.config_path {
            return Some(ChangeKind::Config);
        }

        if path.starts_with(&self.templates_dir) {
            return path
                .extension()
                .is_some_and(|e| e == "html")
                .then(|| ChangeKind::Template(path.to_path_buf()));
        }

        if path.starts_with(&self.content_dir) {
            return Some(ChangeKind::Content(path.to_path_buf()));
        }

        if path.starts_with(&self.static_dir) {
            return Some(ChangeKind::Static(path.to_path_buf()));
        }

        None // Unknown path, ignore
    }
}

// =============================================================================
// File watcher
// =============================================================================

/// A file watcher that can use either native or polling backend.
pub enum FileWatcher {
    /// Native file system watcher (recommended for local development).
    Native {
        _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
        rx: Receiver<WatchEvent>,
    },
    /// Polling-based watcher (for network filesystems, Docker, etc.).
    Polling {
        _debouncer: Debouncer<PollWatcher, RecommendedCache>,
        rx: Receiver<WatchEvent>,
    },
}

impl FileWatcher {
    /// Create a new file watcher.
    pub fn new(config: &WatchConfig, paths: &WatchPaths) -> Result<Self, WatchError> {
        let debounce_timeout = Duration::from_millis(config.debounce_ms);

        // Create channel for events
        let (tx, rx) = mpsc::channel();

        // Callback to convert notify events to our WatchEvent type
        let classifier = paths.clone();
        let callback = move |result: DebounceEventResult| match result {
            Ok(events) => {
                let mut changes: Vec<ChangeKind> = events
                    .iter()
                    .filter(|event| is_relevant_event(&event.kind))
                    .filter_map(|event| event.paths.first().and_then(|p| classifier.classify(p)))
                    .collect();
                changes.dedup();

                if !changes.is_empty() {
                    let _ = tx.send(WatchEvent::FilesChanged(changes));
                }
            }
            Err(errors) => {
                for e in errors {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            }
        };

        if config.poll {
            // Use polling watcher
            let poll_interval = Duration::from_millis(config.poll_interval_ms);
            let notify_config = NotifyConfig::default().with_poll_interval(poll_interval);

            let mut debouncer = new_debouncer_opt::<_, PollWatcher, RecommendedCache>(
                debounce_timeout,
                None,
                callback,
                RecommendedCache::default(),
                notify_config,
            )?;

            add_watch_paths_to_debouncer(&mut debouncer, paths)?;

            Ok(FileWatcher::Polling {
                _debouncer: debouncer,
                rx,
            })
        } else {
            // Use native watcher
            let mut debouncer = new_debouncer(debounce_timeout, None, callback)?;

            add_watch_paths_to_debouncer(&mut debouncer, paths)?;

            Ok(FileWatcher::Native {
                _debouncer: debouncer,
                rx,
            })
        }
    }

    /// Receive the next watch event (blocking).
    pub fn recv(&self) -> Option<WatchEvent> {
        match self {
            FileWatcher::Native { rx, .. } => rx.recv().ok(),
            FileWatcher::Polling { rx, .. } => rx.recv().ok(),
        }
    }
}

/// Add watch paths to a debouncer.
fn add_watch_paths_to_debouncer<W: Watcher, C: notify_debouncer_full::FileIdCache>(
    debouncer: &mut Debouncer<W, C>,
    paths: &WatchPaths,
) -> Result<(), WatchError> {
    for dir in [&paths.content_dir, &paths.templates_dir, &paths.static_dir] {
        if dir.exists() {
            debouncer.watch(dir, RecursiveMode::Recursive)?;
        }
    }

    // Watch config file's parent directory (to catch config changes)
    if let Some(parent) = paths.config_path.parent()
        && parent.exists()
    {
        debouncer.watch(parent, RecursiveMode::NonRecursive)?;
    }

    Ok(())
}

/// Check if an event kind is relevant for rebuilds.
fn is_relevant_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange};

    fn paths() -> WatchPaths {
        WatchPaths {
            content_dir: PathBuf::from("/site/content"),
            templates_dir: PathBuf::from("/site/templates"),
            static_dir: PathBuf::from("/site/static"),
            config_path: PathBuf::from("/site/tofu.yaml"),
        }
    }

    #[test]
    fn test_classify() {
        let paths = paths();

        assert_eq!(
            paths.classify(Path::new("/site/tofu.yaml")),
            Some(ChangeKind::Config)
        );
        assert_eq!(
            paths.classify(Path::new("/site/templates/partials/nav.html")),
            Some(ChangeKind::Template(PathBuf::from(
                "/site/templates/partials/nav.html"
            )))
        );
        assert_eq!(
            paths.classify(Path::new("/site/content/articles/a.md")),
            Some(ChangeKind::Content(PathBuf::from("/site/content/articles/a.md")))
        );
        assert_eq!(
            paths.classify(Path::new("/site/static/app.css")),
            Some(ChangeKind::Static(PathBuf::from("/site/static/app.css")))
        );
    }

    #[test]
    fn test_classify_ignores_unrelated_paths() {
        let paths = paths();

        assert_eq!(paths.classify(Path::new("/site/dist/index.html")), None);
        assert_eq!(paths.classify(Path::new("/site/templates/notes.txt")), None);
        assert_eq!(
            paths.classify(Path::new("/site/content/.articles.md.swp")),
            None
        );
    }

    #[test]
    fn test_relevant_events() {
        assert!(is_relevant_event(&EventKind::Create(CreateKind::File)));
        assert!(is_relevant_event(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(!is_relevant_event(&EventKind::Access(AccessKind::Any)));
    }
}
