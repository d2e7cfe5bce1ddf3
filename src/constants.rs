//! Application-wide constants.
//!
//! Centralized values for the citation markup, sources, and git identity.

/// Default target document, relative to the workspace.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Environment variable naming the workspace directory (set by GitHub Actions).
pub const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Text written into the document when the count cannot be determined.
pub const DEFAULT_SENTINEL: &str = "Error";

/// Id of the container element wrapping the citation count.
pub const CONTAINER_ID: &str = "citation-matrix";

/// Id of the inner element holding the rendered count.
pub const COUNT_ID: &str = "citation_count";

/// Profile scraped when no identifier is given for the scrape source.
pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.com/citations?user=p6fjrJIAAAAJ&hl=en";

/// Desktop browser identity sent with profile scrapes.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// CSS selector of the first "all citations" cell on a Scholar profile.
pub const SCHOLAR_COUNT_SELECTOR: &str = "td.gsc_rsb_std";

pub const OPENALEX_API_BASE: &str = "https://api.openalex.org";
pub const SEMANTIC_SCHOLAR_API_BASE: &str = "https://api.semanticscholar.org";

/// Optional Semantic Scholar key for higher rate limits.
pub const SEMANTIC_SCHOLAR_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

pub const COMMITTER_NAME: &str = "github-actions[bot]";
pub const COMMITTER_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";
pub const COMMIT_MESSAGE: &str = "Update citation count";

/// Spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;
