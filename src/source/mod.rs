//! Citation count sources.
//!
//! Each source performs a single blocking HTTP GET. Failures never escape
//! [`CitationSource::fetch`]: they are logged and become
//! [`CitationCount::Unavailable`].

pub mod author_search;
pub mod graph;
pub mod scholar;

use crate::citation::CitationCount;
use crate::config::SourceConfig;
use crate::error::FetchError;
use anyhow::Context;
use reqwest::blocking::Client;

pub use author_search::OpenAlexAuthorSearch;
pub use graph::SemanticScholarGraph;
pub use scholar::ScholarProfile;

/// A place to look up an author's citation count.
pub trait CitationSource {
    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;

    fn try_fetch(&self) -> Result<CitationCount, FetchError>;

    /// Fetches the count, downgrading any failure to `Unavailable`.
    fn fetch(&self) -> CitationCount {
        match self.try_fetch() {
            Ok(count) => {
                if count.is_available() {
                    log::info!("{} reports {} citations", self.name(), count);
                } else {
                    log::warn!("{} returned no usable citation count", self.name());
                }
                count
            }
            Err(err) => {
                log::warn!("Failed to fetch citations from {}: {}", self.name(), err);
                CitationCount::Unavailable
            }
        }
    }
}

/// Builds the source selected by `config`.
pub fn from_config(config: &SourceConfig) -> anyhow::Result<Box<dyn CitationSource>> {
    let source: Box<dyn CitationSource> = match config {
        SourceConfig::Scrape { url } => Box::new(ScholarProfile::new(url)?),
        SourceConfig::AuthorSearch { author_id } => Box::new(OpenAlexAuthorSearch::new(author_id)?),
        SourceConfig::GraphApi { author_id } => Box::new(SemanticScholarGraph::new(author_id)?),
    };
    log::debug!("Using citation source: {}", source.name());
    Ok(source)
}

/// Blocking client with the host default timeout.
pub(crate) fn http_client(user_agent: &str) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .context("Failed to build HTTP client")
}

/// User agent for the JSON APIs.
pub(crate) fn api_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scripted {
        result: Cell<Option<Result<CitationCount, FetchError>>>,
    }

    impl CitationSource for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn try_fetch(&self) -> Result<CitationCount, FetchError> {
            self.result.take().expect("fetched once")
        }
    }

    #[test]
    fn test_fetch_downgrades_errors_to_unavailable() {
        let source = Scripted {
            result: Cell::new(Some(Err(FetchError::Parse("missing".into())))),
        };
        assert_eq!(source.fetch(), CitationCount::Unavailable);

        let source = Scripted {
            result: Cell::new(Some(Err(FetchError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )))),
        };
        assert_eq!(source.fetch(), CitationCount::Unavailable);
    }

    #[test]
    fn test_fetch_passes_counts_through() {
        let source = Scripted {
            result: Cell::new(Some(Ok(CitationCount::Count(17)))),
        };
        assert_eq!(source.fetch(), CitationCount::Count(17));
    }

    #[test]
    fn test_from_config_selects_variant() -> anyhow::Result<()> {
        let scrape = from_config(&SourceConfig::Scrape {
            url: "https://scholar.google.com/citations?user=x".into(),
        })?;
        assert_eq!(scrape.name(), "Google Scholar");

        let search = from_config(&SourceConfig::AuthorSearch {
            author_id: "A5023888391".into(),
        })?;
        assert_eq!(search.name(), "OpenAlex");

        let graph = from_config(&SourceConfig::GraphApi {
            author_id: "1741101".into(),
        })?;
        assert_eq!(graph.name(), "Semantic Scholar");
        Ok(())
    }
}
