use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::git::github::{GithubItem, IssueSource};
use crate::git::local::{self, Commit};

pub const SHOWN_ISSUES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RepoSummary {
    pub path: PathBuf,
    pub branch: String,
    pub commit: Commit,
    pub issues: Vec<GithubItem>,
    pub pull_requests: Vec<GithubItem>,
}

/// What one repository panel shows: its summary, or why it could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoPanel {
    Loaded(RepoSummary),
    Failed { path: PathBuf, error: String },
}

impl RepoPanel {
    pub fn path(&self) -> &Path {
        match self {
            RepoPanel::Loaded(summary) => &summary.path,
            RepoPanel::Failed { path, .. } => path,
        }
    }
}

pub fn load<I: IssueSource>(path: &Path, source: &I) -> RepoPanel {
    match try_load(path, source) {
        Ok(summary) => RepoPanel::Loaded(summary),
        Err(err) => {
            let error = format!("{:#}", err);
            warn!(path = %path.display(), %error, "repository panel failed");
            RepoPanel::Failed {
                path: path.to_path_buf(),
                error,
            }
        }
    }
}

fn try_load<I: IssueSource>(path: &Path, source: &I) -> Result<RepoSummary> {
    let (owner, repo) = local::github_repo(path)?;
    let mut issues = source.issues(&owner, &repo)?;
    issues.truncate(SHOWN_ISSUES);
    let pull_requests = source.pull_requests(&owner, &repo)?;
    Ok(RepoSummary {
        path: path.to_path_buf(),
        branch: local::current_branch(path)?,
        commit: local::last_commit(path)?,
        issues,
        pull_requests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Offline;

    impl IssueSource for Offline {
        fn issues(&self, _owner: &str, _repo: &str) -> Result<Vec<GithubItem>> {
            Err(anyhow!("offline"))
        }
        fn pull_requests(&self, _owner: &str, _repo: &str) -> Result<Vec<GithubItem>> {
            Err(anyhow!("offline"))
        }
    }

    #[test]
    fn test_broken_repository_becomes_failed_panel() {
        let dir = tempfile::tempdir().unwrap();
        let panel = load(dir.path(), &Offline);
        match &panel {
            RepoPanel::Failed { path, error } => {
                assert_eq!(path, dir.path());
                assert!(!error.is_empty());
            }
            other => panic!("expected a failed panel, got {:?}", other),
        }
        assert_eq!(panel.path(), dir.path());
    }
}
