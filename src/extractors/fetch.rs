use scraper::Html;

/// The catalogue serves a stripped page to clients without a recognizable
/// desktop browser identity, so every request goes out with this one.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.49";

/// A fetched catalogue page. Owns the raw body; the parsed document tree is
/// built on demand in synchronous code so it never has to live across an
/// await point.
pub struct Page {
    body: String,
}

impl Page {
    pub fn new(body: String) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Issue a single GET for `url` and wrap the body. Any transport or body
/// error degrades to `None`; nothing propagates past this boundary.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Option<Page> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("request for {} failed: {}", url, e);
            return None;
        }
    };

    match response.text().await {
        Ok(body) => Some(Page::new(body)),
        Err(e) => {
            tracing::debug!("reading body of {} failed: {}", url, e);
            None
        }
    }
}
