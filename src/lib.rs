pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod plugin;

pub use config::Config;
pub use crate::core::{Artist, Collection, CollectionKind, Kind, PluginError, Resolved, Track};
pub use extractors::{classify, AppleMusic};
pub use plugin::{AppleMusicPlugin, InfoPlugin};
