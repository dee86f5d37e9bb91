use url::Url;

use crate::config::Config;
use crate::core::{Artist, Collection, CollectionKind, Kind, Track};
use crate::extractors::artwork::DEFAULT_THUMBNAIL;
use crate::extractors::fetch::{fetch_page, Page};
use crate::extractors::payload::{locate_server_data, parse_server_data, LockupItem, OgSong};

const TRACK_LOCKUP: &str = "trackLockup";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const CATALOGUE_ARTIST: &str = "Apple Music";

/// Catalogue access: one fetch per operation, synchronous extraction, no
/// state beyond the shared HTTP client.
pub struct AppleMusic {
    client: reqwest::Client,
    storefront: String,
}

impl AppleMusic {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            storefront: config.storefront.clone(),
        }
    }

    /// Search the catalogue and normalize the track results. Degrades to an
    /// empty list on any failure; never errors.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        let url = format!(
            "https://music.apple.com/{}/search?term={}",
            self.storefront,
            urlencoding::encode(query)
        );
        let Some(page) = fetch_page(&self.client, &url).await else {
            return Vec::new();
        };
        Self::search_results(&page)
    }

    /// Extract search results from an already-fetched search page.
    pub fn search_results(page: &Page) -> Vec<Track> {
        let Some(raw) = locate_server_data(page) else {
            return Vec::new();
        };
        let Some(data) = parse_server_data(&raw) else {
            return Vec::new();
        };
        let Some(section) = data.sections.iter().find(|s| s.item_kind == TRACK_LOCKUP) else {
            tracing::debug!("search page carries no {} section", TRACK_LOCKUP);
            return Vec::new();
        };

        section.items.iter().filter_map(Self::lockup_track).collect()
    }

    fn lockup_track(item: &LockupItem) -> Option<Track> {
        let descriptor = item.content_descriptor.as_ref()?;
        let id = descriptor.identifiers.as_ref()?.store_adam_id.clone()?;
        let url = descriptor.url.clone()?;
        let title = item.title.clone()?;

        let thumbnail = item
            .artwork
            .as_ref()
            .and_then(|artwork| artwork.dictionary.as_ref())
            .and_then(|dictionary| dictionary.image())
            .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());
        let artist = item
            .subtitle_links
            .first()
            .and_then(|link| link.title.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Some(Track {
            kind: Kind::Track,
            id,
            title,
            url,
            thumbnail,
            artist: Artist { name: artist },
            duration: Some(item.duration.clone().unwrap_or_else(|| "0:00".to_string())),
        })
    }

    /// Resolve a single track from its catalogue URL.
    ///
    /// The item id (`?i=` parameter) and the name segment after `album/` are
    /// parsed out of the URL first; if either is missing this returns `None`
    /// without fetching anything. Otherwise the canonical song page is
    /// fetched and extracted, falling back to meta tags when the embedded
    /// payload is unusable.
    pub async fn track_info(&self, link: &str) -> Option<Track> {
        let (name, id) = parse_track_link(link)?;
        let url = format!(
            "https://music.apple.com/{}/song/{}/{}",
            self.storefront, name, id
        );
        let page = fetch_page(&self.client, &url).await?;
        Self::track_from_page(&page, &name, &id, &url)
    }

    /// Extract a track from an already-fetched song page.
    pub fn track_from_page(page: &Page, name: &str, id: &str, link: &str) -> Option<Track> {
        match Self::track_primary(page, id, link) {
            Some(track) => Some(track),
            None => {
                tracing::debug!("embedded payload unusable for {}, trying meta tags", link);
                Self::track_fallback(page, name, id, link)
            }
        }
    }

    fn track_primary(page: &Page, url_id: &str, link: &str) -> Option<Track> {
        let raw = locate_server_data(page)?;
        let data = parse_server_data(&raw)?;
        let seo = data.seo_data?;
        let attributes = seo
            .og_songs
            .first()
            .and_then(|song| song.attributes.as_ref());

        let id = seo
            .og_songs
            .first()
            .and_then(|song| song.id.clone())
            .or_else(|| seo.apple_content_id.clone())
            .unwrap_or_else(|| url_id.to_string());
        // No usable title means the whole strategy failed.
        let title = attributes
            .and_then(|a| a.name.clone())
            .or_else(|| seo.apple_title.clone())?;
        let url = attributes
            .and_then(|a| a.url.clone())
            .or_else(|| seo.url.clone())
            .unwrap_or_else(|| link.to_string());
        let thumbnail = attributes
            .and_then(|a| a.artwork.as_ref())
            .and_then(|artwork| artwork.image())
            .or_else(|| seo.image())
            .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());
        let artist = attributes
            .and_then(|a| a.artist_name.clone())
            .or_else(|| seo.social_title.clone())
            .unwrap_or_else(|| CATALOGUE_ARTIST.to_string());

        Some(Track {
            kind: Kind::Track,
            id,
            title,
            url,
            thumbnail,
            artist: Artist { name: artist },
            duration: None,
        })
    }

    fn track_fallback(page: &Page, name: &str, id: &str, link: &str) -> Option<Track> {
        use scraper::Selector;

        let document = page.document();
        let meta_selector = Selector::parse("meta").ok()?;
        let metas: Vec<_> = document.select(&meta_selector).collect();
        if metas.is_empty() {
            return None;
        }

        let meta_named = |wanted: &str| {
            metas
                .iter()
                .find(|meta| meta.value().attr("name") == Some(wanted))
                .and_then(|meta| meta.value().attr("content"))
                .map(|content| content.to_string())
        };
        let meta_property = |wanted: &str| {
            metas
                .iter()
                .find(|meta| meta.value().attr("property") == Some(wanted))
                .and_then(|meta| meta.value().attr("content"))
                .map(|content| content.to_string())
        };

        let title = meta_named("apple:title")
            .or_else(|| {
                let title_selector = Selector::parse("title").ok()?;
                document
                    .select(&title_selector)
                    .next()
                    .map(|element| element.text().collect::<String>())
                    .filter(|text| !text.is_empty())
            })
            .unwrap_or_else(|| name.to_string());
        let id = meta_named("apple:content_id").unwrap_or_else(|| id.to_string());
        let thumbnail = meta_property("og:image:secure_url")
            .or_else(|| meta_property("og:image"))
            .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());

        let artist_selector = Selector::parse(".song-subtitles__artists>a").ok()?;
        let artist = document
            .select(&artist_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| CATALOGUE_ARTIST.to_string());

        Some(Track {
            kind: Kind::Track,
            id,
            title,
            url: link.to_string(),
            thumbnail,
            artist: Artist { name: artist },
            duration: None,
        })
    }

    /// Resolve an album page into a collection.
    pub async fn album_info(&self, link: &str) -> Option<Collection> {
        self.collection_info(link, CollectionKind::Album).await
    }

    /// Resolve a playlist page into a collection.
    pub async fn playlist_info(&self, link: &str) -> Option<Collection> {
        self.collection_info(link, CollectionKind::Playlist).await
    }

    // Collections have no markup fallback: when the embedded payload is
    // unusable the resolve fails outright.
    async fn collection_info(&self, link: &str, kind: CollectionKind) -> Option<Collection> {
        let page = fetch_page(&self.client, link).await?;
        Self::collection_from_page(&page, link, kind)
    }

    /// Extract a collection from an already-fetched album or playlist page.
    pub fn collection_from_page(page: &Page, link: &str, kind: CollectionKind) -> Option<Collection> {
        let raw = locate_server_data(page)?;
        let data = parse_server_data(&raw)?;
        let seo = data.seo_data?;

        let thumbnail = seo.image().unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());
        let id = seo.apple_content_id.clone()?;
        let title = seo.apple_title.clone()?;
        let url = seo.url.clone().unwrap_or_else(|| link.to_string());
        let artist = seo
            .og_songs
            .first()
            .and_then(|song| song.attributes.as_ref())
            .and_then(|a| a.artist_name.clone())
            .unwrap_or_else(|| CATALOGUE_ARTIST.to_string());

        let tracks = seo
            .og_songs
            .iter()
            .filter_map(|song| Self::member_track(song, &thumbnail))
            .collect();

        Some(Collection {
            kind,
            id,
            title,
            url,
            thumbnail,
            artist: Artist { name: artist },
            tracks,
        })
    }

    fn member_track(song: &OgSong, collection_thumbnail: &str) -> Option<Track> {
        let attributes = song.attributes.as_ref()?;
        let id = song.id.clone()?;
        let title = attributes.name.clone()?;
        let url = attributes.url.clone()?;

        // Members resolve their own artwork first; the collection image only
        // fills genuinely absent artwork.
        let thumbnail = attributes
            .artwork
            .as_ref()
            .and_then(|artwork| artwork.image())
            .unwrap_or_else(|| collection_thumbnail.to_string());
        let artist = attributes
            .artist_name
            .clone()
            .unwrap_or_else(|| CATALOGUE_ARTIST.to_string());

        Some(Track {
            kind: Kind::Track,
            id,
            title,
            url,
            thumbnail,
            artist: Artist { name: artist },
            duration: None,
        })
    }
}

impl Default for AppleMusic {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the `{name, id}` pair out of a track URL: `i` query parameter for
/// the id, the path segment following `album/` for the name.
pub fn parse_track_link(link: &str) -> Option<(String, String)> {
    let url = Url::parse(link).ok()?;
    let id = url
        .query_pairs()
        .find(|(key, _)| key == "i")
        .map(|(_, value)| value.to_string())?;
    let name = url.path().split("album/").nth(1)?.split('/').next()?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), id))
}
