//! Test infrastructure for citation-sync integration tests.
#![allow(dead_code)]

use anyhow::Result;
use citation_sync::citation::CitationCount;
use citation_sync::error::FetchError;
use citation_sync::git::{CommitOutcome, VersionControl, run_git};
use citation_sync::source::CitationSource;
use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use tempfile::TempDir;

pub const EMPTY_PAGE: &str = "<html><body></body></html>";

/// A temporary git repository holding an `index.html`.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a repository on `master` with `page` committed as `index.html`.
    pub fn new(page: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init", "-b", "master"])?;
        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("index.html"), page)?;
        run_git(&path, &["add", "index.html"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a test repository tracking a bare remote.
    /// Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote(page: &str) -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare"])?;

        let local = Self::new(page)?;
        run_git(
            &local.path,
            &["remote", "add", "origin", remote_dir.path().to_str().unwrap()],
        )?;
        run_git(&local.path, &["push", "-u", "origin", "master"])?;

        Ok((local, remote_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> PathBuf {
        self.path.join("index.html")
    }

    pub fn read_document(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.document())?)
    }

    pub fn write_document(&self, page: &str) -> Result<()> {
        Ok(std::fs::write(self.document(), page)?)
    }

    pub fn head_message(&self) -> Result<String> {
        run_git(&self.path, &["log", "-1", "--format=%s"])
    }

    pub fn commit_count(&self) -> Result<usize> {
        Ok(run_git(&self.path, &["rev-list", "--count", "HEAD"])?.parse()?)
    }
}

/// Source returning a fixed count without network access.
pub struct FixedSource(pub CitationCount);

impl CitationSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn try_fetch(&self) -> Result<CitationCount, FetchError> {
        Ok(self.0)
    }
}

/// Source that always fails the way an unreachable server would.
pub struct FailingSource;

impl CitationSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn try_fetch(&self) -> Result<CitationCount, FetchError> {
        Err(FetchError::Parse("no citation element".to_string()))
    }
}

/// Version control double that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingVcs {
    pub calls: RefCell<Vec<String>>,
    pub fail_commit: bool,
    pub fail_push: bool,
    pub nothing_to_commit: bool,
}

impl RecordingVcs {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl VersionControl for RecordingVcs {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("identity {} <{}>", name, email));
        Ok(())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("stage {}", path.display()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.calls.borrow_mut().push(format!("commit {}", message));
        if self.fail_commit {
            anyhow::bail!("git commit -m {} failed: hook rejected", message);
        }
        if self.nothing_to_commit {
            return Ok(CommitOutcome::NothingToCommit);
        }
        Ok(CommitOutcome::Committed)
    }

    fn push(&self) -> Result<()> {
        self.calls.borrow_mut().push("push".to_string());
        if self.fail_push {
            anyhow::bail!("git push failed: could not read from remote repository");
        }
        Ok(())
    }
}

/// Serves one canned HTTP response on a local port.
/// Returns the base URL and a receiver yielding the raw request head.
pub fn serve_once(status: &str, content_type: &str, body: &str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (format!("http://{}", addr), rx)
}
