use crate::core::Kind;
use regex::Regex;
use std::sync::LazyLock;

/// Substring every supported URL must carry; the host's validate gate checks
/// it before classification.
pub const CATALOGUE_DOMAIN: &str = "music.apple.com";

// A song page, or an album page with an `?i=<id>` item parameter appended.
static TRACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://music\.apple\.com/.+?/(?:(?:song|album)/.+?/.+?\?i=[0-9]+|song/.+?/[0-9]+)$")
        .expect("track url pattern")
});

static PLAYLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://music\.apple\.com/.+?/playlist/.+/pl\.(u-|pm-)?[a-zA-Z0-9]+$")
        .expect("playlist url pattern")
});

static ALBUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://music\.apple\.com/.+?/album/.+/[0-9]+$").expect("album url pattern")
});

/// Classify a candidate URL into one of the supported catalogue kinds.
///
/// Pure pattern matching, no I/O, never fails; unrecognized input yields
/// `None`. The track pattern is tested first, so an album page URL carrying
/// an item-id parameter classifies as a track.
pub fn classify(url: &str) -> Option<Kind> {
    if TRACK_RE.is_match(url) {
        Some(Kind::Track)
    } else if PLAYLIST_RE.is_match(url) {
        Some(Kind::Playlist)
    } else if ALBUM_RE.is_match(url) {
        Some(Kind::Album)
    } else {
        None
    }
}
