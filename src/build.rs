mod builder;
mod content;
mod document;
mod markdown;
mod paths;
mod pipeline;
mod watch;

pub use builder::{BuildResult, Builder};
pub use paths::{base_path_from_config, normalize_path, resolve_path};
pub use watch::{ChangeKind, FileWatcher, WatchEvent, WatchPaths};
