use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// Non-breaking space, the website fills empty cells with it
pub const NBSP: &str = "\u{a0}";

/// Build the HTTP client shared by every request of the run
pub fn make_client(user_agent: &str, timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Get a webpage and parse it
pub async fn get_webpage(client: &reqwest::Client, url: &str) -> Result<Html> {
    log::debug!("GET {url}");
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(Html::parse_document(&html))
}

/// Compile a selector known at compile time
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css}: {e:?}"))
}

/// First descendant of `element` matching `selector`
pub fn select_one<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    what: &str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or_else(|| Error::html_parse(format!("missing {what}")))
}

/// Every text node of the element, concatenated
pub fn text_of(element: ElementRef) -> String {
    element.text().collect()
}
