use thiserror::Error;

/// Typed failures surfaced at the plugin boundary. Everything below this
/// layer degrades to `None` / empty results; only these errors reach the
/// host.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid Apple Music url: {0}")]
    InvalidUrl(String),

    #[error("failed to get data from Apple Music")]
    UpstreamFetchFailed,

    /// Resolved entity kind outside {track, album, playlist}. Part of the
    /// host contract; the typed `Kind` model never produces it itself.
    #[error("this Apple Music link is not supported")]
    UnsupportedKind,

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
