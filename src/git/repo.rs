// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{DevtraceError, GitError, Result};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path, searching parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                DevtraceError::Git(GitError::NotARepository)
            } else {
                DevtraceError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner })
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            DevtraceError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            DevtraceError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get commits in a range, oldest first.
    ///
    /// `A..B` yields the commits reachable from `B` but not `A`; a single
    /// revision yields just that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        if !range.contains("..") {
            let commit = self.get_commit(range)?;
            return Ok(vec![(commit.id(), message_of(&commit))]);
        }

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_error("revwalk", e))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .map_err(|e| walk_error("revwalk.set_sorting", e))?;
        revwalk.push_range(range).map_err(|e| {
            DevtraceError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", range, e.message()),
            })
        })?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| walk_error("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                DevtraceError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, message_of(&commit)));
        }

        tracing::debug!("Found {} commits in {}", commits.len(), range);
        Ok(commits)
    }
}

fn message_of(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

fn walk_error(command: &str, e: git2::Error) -> DevtraceError {
    DevtraceError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: e.message().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_test_repo(messages: &[&str]) -> (TempDir, Vec<Oid>) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let oids = messages.iter().map(|m| commit(&repo, m)).collect();
        (dir, oids)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _) = create_test_repo(&["Initial commit"]);
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(DevtraceError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_single_revision() {
        let (dir, oids) = create_test_repo(&["first", "second"]);
        let repo = Repository::open(dir.path()).unwrap();
        let commits = repo.get_commits_in_range("HEAD").unwrap();
        assert_eq!(commits, vec![(oids[1], "second".to_string())]);
    }

    #[test]
    fn test_range_oldest_first() {
        let (dir, oids) = create_test_repo(&["first", "second", "third", "fourth"]);
        let repo = Repository::open(dir.path()).unwrap();
        let range = format!("{}..HEAD", oids[0]);
        let commits = repo.get_commits_in_range(&range).unwrap();
        let messages: Vec<_> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["second", "third", "fourth"]);
    }

    #[test]
    fn test_invalid_reference() {
        let (dir, _) = create_test_repo(&["first"]);
        let repo = Repository::open(dir.path()).unwrap();
        assert!(matches!(
            repo.get_commits_in_range("no-such-branch"),
            Err(DevtraceError::Git(GitError::InvalidReference { .. }))
        ));
    }
}
