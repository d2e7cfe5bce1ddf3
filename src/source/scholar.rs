//! Google Scholar profile scrape.

use super::{CitationSource, http_client};
use crate::citation::CitationCount;
use crate::constants::{BROWSER_USER_AGENT, SCHOLAR_COUNT_SELECTOR};
use crate::error::FetchError;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

/// Reads the "Citations / All" cell of a public Scholar profile page.
pub struct ScholarProfile {
    client: Client,
    url: String,
}

impl ScholarProfile {
    /// Scholar rejects obvious bots, so requests carry a desktop browser user agent.
    pub fn new(url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(BROWSER_USER_AGENT)?,
            url: url.to_string(),
        })
    }
}

impl CitationSource for ScholarProfile {
    fn name(&self) -> &'static str {
        "Google Scholar"
    }

    fn try_fetch(&self) -> Result<CitationCount, FetchError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text()?;
        parse_profile(&body)
    }
}

/// Extracts the citation count from profile markup.
///
/// A present but non-numeric cell (e.g. `1,234`) is `Unavailable`, not an error.
pub fn parse_profile(html: &str) -> Result<CitationCount, FetchError> {
    let selector = Selector::parse(SCHOLAR_COUNT_SELECTOR).expect("scholar count selector");
    let document = Html::parse_document(html);
    let cell = document.select(&selector).next().ok_or_else(|| {
        FetchError::Parse(format!("no element matching `{}`", SCHOLAR_COUNT_SELECTOR))
    })?;

    let text: String = cell.text().collect();
    let count = CitationCount::from_digits(&text);
    if !count.is_available() {
        log::debug!("citation cell text is not a plain number: {:?}", text.trim());
    }
    Ok(count)
}
