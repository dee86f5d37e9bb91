pub mod error;
pub mod models;

pub use error::PluginError;
pub use models::{Artist, Collection, CollectionKind, Kind, Resolved, Track};
