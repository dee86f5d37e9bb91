use serde::{Deserialize, Serialize};

/// Discriminator for the three catalogue entities the plugin understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Track,
    Album,
    Playlist,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Track => "track",
            Kind::Album => "album",
            Kind::Playlist => "playlist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Album,
    Playlist,
}

impl CollectionKind {
    pub fn as_kind(self) -> Kind {
        match self {
            CollectionKind::Album => Kind::Album,
            CollectionKind::Playlist => Kind::Playlist,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.as_kind().as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

/// Normalized song record. Every field is populated by the time a record
/// leaves the extractor; absent upstream data is replaced by the documented
/// fallbacks instead of surfacing half-empty records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "type")]
    pub kind: Kind,
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub artist: Artist,
    /// Upstream display duration, only present on search results ("0:00"
    /// when the catalogue omits it). Pass-through, not normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Normalized album or playlist record with its member tracks in upstream
/// listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub artist: Artist,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// What a plugin `resolve` hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolved {
    Track(Track),
    Collection(Collection),
}

impl Resolved {
    pub fn kind(&self) -> Kind {
        match self {
            Resolved::Track(_) => Kind::Track,
            Resolved::Collection(c) => c.kind.as_kind(),
        }
    }
}
