//! Citation count synchronizer library.
//!
//! This crate keeps a static HTML page's citation count current by:
//! - Fetching the count from Google Scholar, OpenAlex, or Semantic Scholar
//! - Repairing and updating the page's citation region
//! - Writing the page back only when it changed
//! - Committing and pushing the change with git

pub mod citation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod patch;
pub mod source;
pub mod sync;
