//! Typed view of the `serialized-server-data` payload embedded in catalogue
//! pages. The upstream shape is not under our control, so every field is
//! optional or defaulted and each reader declares its own fallback.

use scraper::Selector;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::extractors::artwork::build_image;
use crate::extractors::fetch::Page;

pub const SERVER_DATA_ID: &str = "serialized-server-data";

const SERVER_DATA_OPEN: &str =
    r#"<script type="application/json" id="serialized-server-data">"#;
const SERVER_DATA_CLOSE: &str = "</script>";

/// Find the embedded payload text in a fetched page.
///
/// Two-step lookup: the script element by id first, then a raw-text scan
/// between the literal script delimiters. The second step is load-bearing:
/// the catalogue intermittently serves markup the tree parser drops the
/// script from.
pub fn locate_server_data(page: &Page) -> Option<String> {
    let selector = Selector::parse(&format!("script#{}", SERVER_DATA_ID)).ok()?;
    let document = page.document();
    if let Some(element) = document.select(&selector).next() {
        let text: String = element.text().collect();
        if !text.trim().is_empty() {
            return Some(text);
        }
    }

    page.body()
        .split(SERVER_DATA_OPEN)
        .nth(1)?
        .split(SERVER_DATA_CLOSE)
        .next()
        .map(|raw| raw.to_string())
}

/// Parse the payload. Its outer shape is an array whose first element
/// carries the page data; anything malformed degrades to `None` so the
/// caller can fall back or give up.
pub fn parse_server_data(raw: &str) -> Option<PageData> {
    match serde_json::from_str::<Vec<ServerData>>(raw) {
        Ok(parsed) => parsed.into_iter().next().map(|entry| entry.data),
        Err(e) => {
            tracing::debug!("malformed {} payload: {}", SERVER_DATA_ID, e);
            None
        }
    }
}

/// Ids and artwork dimensions arrive as either JSON numbers or strings
/// (occasionally a literal placeholder); both pass through as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[derive(Debug, Deserialize)]
struct ServerData {
    #[serde(default)]
    data: PageData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageData {
    pub sections: Vec<Section>,
    pub seo_data: Option<SeoData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub item_kind: String,
    pub items: Vec<LockupItem>,
}

/// One entry of a search-results lockup section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LockupItem {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub content_descriptor: Option<ContentDescriptor>,
    pub artwork: Option<LockupArtwork>,
    pub subtitle_links: Vec<SubtitleLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentDescriptor {
    pub identifiers: Option<Identifiers>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Identifiers {
    #[serde(rename = "storeAdamID", deserialize_with = "string_or_number")]
    pub store_adam_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LockupArtwork {
    pub dictionary: Option<ArtworkDictionary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtworkDictionary {
    pub url: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub width: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub height: Option<String>,
}

impl ArtworkDictionary {
    /// Concrete image URL, or `None` when any part of the template is
    /// missing.
    pub fn image(&self) -> Option<String> {
        Some(build_image(
            self.url.as_deref()?,
            self.width.as_deref()?,
            self.height.as_deref()?,
            None,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubtitleLink {
    pub title: Option<String>,
}

/// Canonical page data used by single-item and collection resolves.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoData {
    #[serde(deserialize_with = "string_or_number")]
    pub apple_content_id: Option<String>,
    pub apple_title: Option<String>,
    pub social_title: Option<String>,
    pub url: Option<String>,
    pub artwork_url: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub width: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub height: Option<String>,
    pub file_type: Option<String>,
    pub og_songs: Vec<OgSong>,
}

impl SeoData {
    pub fn image(&self) -> Option<String> {
        Some(build_image(
            self.artwork_url.as_deref()?,
            self.width.as_deref()?,
            self.height.as_deref()?,
            self.file_type.as_deref(),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OgSong {
    #[serde(deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub attributes: Option<SongAttributes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongAttributes {
    pub name: Option<String>,
    pub url: Option<String>,
    pub artist_name: Option<String>,
    pub artwork: Option<ArtworkDictionary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seo_payload() {
        let raw = r#"[{"data":{"seoData":{
            "appleContentId": 1577620739,
            "appleTitle": "Bad Habits",
            "url": "https://music.apple.com/us/album/bad-habits/1577620739",
            "artworkUrl": "https://example.mzstatic.com/{w}x{h}bb.{f}",
            "width": 1200,
            "height": 630,
            "fileType": "jpg",
            "ogSongs": [{"id": "1577621069", "attributes": {
                "name": "Bad Habits",
                "url": "https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069",
                "artistName": "Ed Sheeran"
            }}]
        }}}]"#;

        let data = parse_server_data(raw).unwrap();
        let seo = data.seo_data.unwrap();
        assert_eq!(seo.apple_content_id.as_deref(), Some("1577620739"));
        assert_eq!(seo.apple_title.as_deref(), Some("Bad Habits"));
        assert_eq!(
            seo.image().as_deref(),
            Some("https://example.mzstatic.com/1200x630bb.jpg")
        );
        let song = &seo.og_songs[0];
        assert_eq!(song.id.as_deref(), Some("1577621069"));
        let attrs = song.attributes.as_ref().unwrap();
        assert_eq!(attrs.artist_name.as_deref(), Some("Ed Sheeran"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_server_data("{not json").is_none());
        assert!(parse_server_data("").is_none());
        // Valid JSON, wrong outer shape.
        assert!(parse_server_data(r#"{"data":{}}"#).is_none());
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let data = parse_server_data(r#"[{"data":{}}]"#).unwrap();
        assert!(data.sections.is_empty());
        assert!(data.seo_data.is_none());

        let data = parse_server_data(r#"[{}]"#).unwrap();
        assert!(data.sections.is_empty());
    }

    #[test]
    fn test_locate_prefers_element_lookup() {
        let html = format!(
            "<html><body><script type=\"application/json\" id=\"{}\">[1,2]</script></body></html>",
            SERVER_DATA_ID
        );
        let page = Page::new(html);
        assert_eq!(locate_server_data(&page).as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_locate_falls_back_to_delimiter_scan() {
        // An unterminated comment swallows the script element in the parsed
        // tree; the raw scan still finds the payload.
        let html = format!(
            "<html><body><!-- broken {}[{{\"data\":{{}}}}]{}</body>",
            super::SERVER_DATA_OPEN,
            super::SERVER_DATA_CLOSE
        );
        let page = Page::new(html);
        let found = locate_server_data(&page);
        assert_eq!(found.as_deref(), Some("[{\"data\":{}}]"));
    }

    #[test]
    fn test_locate_missing_payload() {
        let page = Page::new("<html><body><p>nothing here</p></body></html>".to_string());
        assert!(locate_server_data(&page).is_none());
    }

    #[test]
    fn test_artwork_requires_full_template() {
        let artwork = ArtworkDictionary {
            url: Some("https://x/{w}x{h}.{f}".to_string()),
            width: Some("100".to_string()),
            height: None,
        };
        assert!(artwork.image().is_none());
    }
}
