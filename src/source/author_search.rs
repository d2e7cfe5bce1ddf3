//! OpenAlex author lookup.

use super::{CitationSource, api_user_agent, http_client};
use crate::citation::CitationCount;
use crate::constants::OPENALEX_API_BASE;
use crate::error::FetchError;
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AuthorsResponse {
    #[serde(default)]
    results: Vec<AuthorRecord>,
}

#[derive(Debug, Deserialize)]
struct AuthorRecord {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    cited_by_count: Option<u64>,
}

/// Looks an author up by OpenAlex id or ORCID and reads `cited_by_count`
/// from the first match.
pub struct OpenAlexAuthorSearch {
    client: Client,
    base_url: String,
    author_id: String,
}

impl OpenAlexAuthorSearch {
    pub fn new(author_id: &str) -> anyhow::Result<Self> {
        Self::with_base_url(author_id, OPENALEX_API_BASE)
    }

    pub fn with_base_url(author_id: &str, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(&api_user_agent())?,
            base_url: base_url.trim_end_matches('/').to_string(),
            author_id: author_id.trim().to_string(),
        })
    }

    fn filter(&self) -> String {
        let id = self.author_id.as_str();
        match id.strip_prefix("https://orcid.org/").unwrap_or(id) {
            orcid if is_orcid(orcid) => format!("orcid:{}", orcid),
            _ => format!(
                "openalex:{}",
                id.strip_prefix("https://openalex.org/").unwrap_or(id)
            ),
        }
    }
}

impl CitationSource for OpenAlexAuthorSearch {
    fn name(&self) -> &'static str {
        "OpenAlex"
    }

    fn try_fetch(&self) -> Result<CitationCount, FetchError> {
        let url = format!("{}/authors", self.base_url);
        let filter = self.filter();
        log::debug!("GET {} filter={}", url, filter);

        let response = self
            .client
            .get(&url)
            .query(&[("filter", filter.as_str())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        parse_authors(&response.text()?)
    }
}

/// Reads the citation count of the first author record.
pub fn parse_authors(body: &str) -> Result<CitationCount, FetchError> {
    let response: AuthorsResponse = serde_json::from_str(body)?;
    let Some(author) = response.results.into_iter().next() else {
        log::debug!("author search returned no records");
        return Ok(CitationCount::Unavailable);
    };
    log::debug!(
        "matched author {}",
        author.display_name.as_deref().unwrap_or("<unnamed>")
    );
    Ok(author.cited_by_count.into())
}

/// Matches the bare ORCID form `0000-0002-1825-0097` (last digit may be `X`).
fn is_orcid(id: &str) -> bool {
    let groups: Vec<&str> = id.split('-').collect();
    groups.len() == 4
        && groups.iter().enumerate().all(|(i, group)| {
            group.len() == 4
                && group.chars().enumerate().all(|(j, c)| {
                    c.is_ascii_digit() || (i == 3 && j == 3 && c.eq_ignore_ascii_case(&'x'))
                })
        })
}
