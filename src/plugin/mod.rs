use async_trait::async_trait;

use crate::config::Config;
use crate::core::{Kind, PluginError, Resolved, Track};
use crate::extractors::{classify, AppleMusic, CATALOGUE_DOMAIN};

/// Boundary exposed to the playback orchestration host.
#[async_trait]
pub trait InfoPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Gate used by the host before handing a URL to `resolve`.
    fn validate(&self, url: &str) -> bool;

    /// Turn a catalogue URL into a normalized record or a typed failure.
    async fn resolve(&self, url: &str) -> Result<Resolved, PluginError>;

    /// Deterministic query the host uses for supplementary searches.
    fn search_query(&self, track: &Track) -> String;

    /// Tracks related to `track`, never including `track` itself.
    async fn related_tracks(&self, track: &Track) -> Result<Vec<Track>, PluginError>;
}

pub struct AppleMusicPlugin {
    api: AppleMusic,
}

impl AppleMusicPlugin {
    pub fn new() -> Self {
        Self {
            api: AppleMusic::new(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            api: AppleMusic::with_config(config),
        }
    }
}

impl Default for AppleMusicPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoPlugin for AppleMusicPlugin {
    fn name(&self) -> &'static str {
        "applemusic"
    }

    fn validate(&self, url: &str) -> bool {
        url.contains(CATALOGUE_DOMAIN) && classify(url).is_some()
    }

    async fn resolve(&self, url: &str) -> Result<Resolved, PluginError> {
        let kind = classify(url).ok_or_else(|| PluginError::InvalidUrl(url.to_string()))?;

        let resolved = match kind {
            Kind::Track => self.api.track_info(url).await.map(Resolved::Track),
            Kind::Album => self.api.album_info(url).await.map(Resolved::Collection),
            Kind::Playlist => self.api.playlist_info(url).await.map(Resolved::Collection),
        };

        resolved.ok_or(PluginError::UpstreamFetchFailed)
    }

    fn search_query(&self, track: &Track) -> String {
        format!("{} {}", track.title, track.artist.name)
    }

    async fn related_tracks(&self, track: &Track) -> Result<Vec<Track>, PluginError> {
        if track.url.is_empty() {
            return Err(PluginError::InvalidInput(
                "cannot look up related tracks without a track url",
            ));
        }

        let query = if track.artist.name.is_empty() {
            &track.title
        } else {
            &track.artist.name
        };
        let results = self.api.search(query).await;

        Ok(results
            .into_iter()
            .filter(|result| result.url != track.url)
            .collect())
    }
}
