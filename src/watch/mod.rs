//! Background polling of the configuration file for level changes.

mod watcher;

pub use watcher::{LevelWatcher, WatcherTask, DEFAULT_QUANTUM};
