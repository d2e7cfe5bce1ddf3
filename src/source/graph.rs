//! Semantic Scholar academic-graph author endpoint.
//! See: https://api.semanticscholar.org/

use super::{CitationSource, api_user_agent, http_client};
use crate::citation::CitationCount;
use crate::constants::{SEMANTIC_SCHOLAR_API_BASE, SEMANTIC_SCHOLAR_KEY_ENV};
use crate::error::FetchError;
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AuthorResponse {
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
}

pub struct SemanticScholarGraph {
    client: Client,
    base_url: String,
    author_id: String,
    api_key: Option<String>,
}

impl SemanticScholarGraph {
    pub fn new(author_id: &str) -> anyhow::Result<Self> {
        Self::with_base_url(author_id, SEMANTIC_SCHOLAR_API_BASE)
    }

    pub fn with_base_url(author_id: &str, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(&api_user_agent())?,
            base_url: base_url.trim_end_matches('/').to_string(),
            author_id: author_id.trim().to_string(),
            api_key: std::env::var(SEMANTIC_SCHOLAR_KEY_ENV)
                .ok()
                .filter(|k| !k.is_empty()),
        })
    }
}

impl CitationSource for SemanticScholarGraph {
    fn name(&self) -> &'static str {
        "Semantic Scholar"
    }

    fn try_fetch(&self) -> Result<CitationCount, FetchError> {
        let url = format!("{}/graph/v1/author/{}", self.base_url, self.author_id);
        log::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("fields", "citationCount")]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        parse_author(&response.text()?)
    }
}

/// Reads `citationCount` from an author response; absent means `Unavailable`.
pub fn parse_author(body: &str) -> Result<CitationCount, FetchError> {
    let author: AuthorResponse = serde_json::from_str(body)?;
    Ok(author.citation_count.into())
}
