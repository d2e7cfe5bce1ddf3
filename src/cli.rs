//! CLI argument definitions (clap derive)

use crate::config::{self, Config, GitMode, SourceConfig, Verbosity};
use crate::constants::{DEFAULT_DOCUMENT, DEFAULT_SCHOLAR_URL, DEFAULT_SENTINEL, WORKSPACE_ENV};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Scrape a Google Scholar profile page
    Scrape,
    /// OpenAlex author lookup by id or ORCID
    AuthorSearch,
    /// Semantic Scholar academic-graph API
    GraphApi,
}

#[derive(Debug, Parser)]
#[command(
    name = "citation-sync",
    version,
    about = "Fetch an author's citation count and write it into a static HTML page"
)]
pub struct Cli {
    /// Where to read the citation count from
    #[arg(long, value_enum, default_value_t = SourceKind::Scrape)]
    pub source: SourceKind,

    /// Profile URL (scrape) or author id (author-search, graph-api)
    #[arg(long)]
    pub id: Option<String>,

    /// Target HTML document, relative to the workspace
    #[arg(long, default_value = DEFAULT_DOCUMENT)]
    pub file: PathBuf,

    /// Base directory [default: $GITHUB_WORKSPACE, else the current directory]
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Text written when the count cannot be determined
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Skip staging, committing, and pushing
    #[arg(long)]
    pub no_git: bool,

    /// Commit but do not push
    #[arg(long, conflicts_with = "no_git")]
    pub no_push: bool,

    /// Fetch and patch without writing the file or touching git
    #[arg(long)]
    pub dry_run: bool,

    /// Only print the final result
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print each step and git command
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    fn source_config(&self) -> anyhow::Result<SourceConfig> {
        let id = self.id.as_deref().map(str::trim).filter(|id| !id.is_empty());
        let source = match self.source {
            SourceKind::Scrape => SourceConfig::Scrape {
                url: id.unwrap_or(DEFAULT_SCHOLAR_URL).to_string(),
            },
            SourceKind::AuthorSearch => SourceConfig::AuthorSearch {
                author_id: id
                    .ok_or_else(|| anyhow::anyhow!("--id is required for --source author-search"))?
                    .to_string(),
            },
            SourceKind::GraphApi => SourceConfig::GraphApi {
                author_id: id
                    .ok_or_else(|| anyhow::anyhow!("--id is required for --source graph-api"))?
                    .to_string(),
            },
        };
        Ok(source)
    }
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let source = cli.source_config()?;
        let verbosity = cli.verbosity();
        let workspace =
            config::resolve_workspace(cli.workspace, std::env::var_os(WORKSPACE_ENV))?;
        let git = if cli.no_git {
            GitMode::Disabled
        } else {
            GitMode::Enabled { push: !cli.no_push }
        };

        Ok(Self {
            source,
            document_path: cli.file,
            workspace,
            sentinel: cli.sentinel,
            git,
            dry_run: cli.dry_run,
            verbosity,
        })
    }
}
