//! Optional product page (PDP) title source.
//!
//! Everything here is best-effort: callers treat any [`FetchError`] as
//! "no title extracted" and fall back to manual entry.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::FetchError;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
/// Element holding the product title on a marketplace product page.
pub const TITLE_SELECTOR: &str = "#productTitle";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Text content of the first element matching `selector`, whitespace collapsed.
pub fn extract_title(html: &str, selector: &str) -> Result<String, FetchError> {
    let parsed =
        Selector::parse(selector).map_err(|_| FetchError::Selector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let title = document
        .select(&parsed)
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .find(|title| !title.is_empty());
    title.ok_or_else(|| FetchError::MissingElement(selector.to_string()))
}

/// GET the product page and pull its title out. Blocks for at most `timeout`.
pub fn fetch_product_title(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.text()?;
    extract_title(&body, TITLE_SELECTOR)
}

/// Run [`fetch_product_title`] on a worker thread so the UI keeps painting.
pub fn spawn_title_fetch(url: String) -> Receiver<Result<String, FetchError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::info!("Fetching product title from {url}");
        let result = fetch_product_title(&url, FETCH_TIMEOUT);
        // receiver gone means the user loaded something else; nothing to do
        let _ = tx.send(result);
    });
    rx
}
