// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, LintError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository for reading commit history.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            LintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LintError::Git(GitError::NotARepository)
            } else {
                LintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the SHA and message of a commit.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        Ok((commit.id(), message_of(&commit)))
    }

    /// Get commits in a `from..to` range, newest first.
    ///
    /// A single reference yields just that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            return Ok(vec![self.get_commit_message(range)?]);
        };
        let to = if to.is_empty() { "HEAD" } else { to };

        let mut revwalk = self.inner.revwalk().map_err(|e| revwalk_failed("revwalk", e))?;

        let to = self.get_commit(to)?;
        revwalk
            .push(to.id())
            .map_err(|e| revwalk_failed("revwalk.push", e))?;

        if !from.is_empty() {
            let from = self.get_commit(from)?;
            revwalk
                .hide(from.id())
                .map_err(|e| revwalk_failed("revwalk.hide", e))?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| revwalk_failed("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                LintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, message_of(&commit)));
        }

        Ok(commits)
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get the hooks directory, honouring `core.hooksPath`.
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .inner
            .config()
            .and_then(|config| config.get_path("core.hooksPath"))
            .ok();

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self
                .inner
                .workdir()
                .map(|workdir| workdir.join(&path))
                .unwrap_or_else(|| self.git_dir().join(path)),
            None => self.git_dir().join("hooks"),
        }
    }
}

/// Commit message text; bytes that are not UTF-8 become U+FFFD.
fn message_of(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

fn revwalk_failed(command: &str, err: git2::Error) -> LintError {
    LintError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: err.message().to_string(),
    })
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get the SHA and message of a commit.
pub fn get_commit(reference: &str) -> Result<(String, String)> {
    let repo = Repository::open_current()?;
    let (oid, message) = repo.get_commit_message(reference)?;
    Ok((oid.to_string(), message))
}

/// Get commits in a range.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(range)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        commit(&repo, "chore: initial commit");
        commit(&repo, "feat: add parser");
        commit(&repo, "Fix: broken thing.");

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _repo) = create_test_repo();
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(LintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_get_commit_message() {
        let (_dir, repo) = create_test_repo();
        let (_, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, "Fix: broken thing.");
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo) = create_test_repo();
        assert!(matches!(
            repo.get_commit_message("no-such-ref"),
            Err(LintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_commits_in_range() {
        let (_dir, repo) = create_test_repo();
        let commits = repo.get_commits_in_range("HEAD~2..HEAD").unwrap();
        let messages: Vec<&str> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["Fix: broken thing.", "feat: add parser"]);
    }

    #[test]
    fn test_open_ended_range() {
        let (_dir, repo) = create_test_repo();
        assert_eq!(repo.get_commits_in_range("HEAD~1..").unwrap().len(), 1);
        assert_eq!(repo.get_commits_in_range("..HEAD").unwrap().len(), 3);
    }

    #[test]
    fn test_non_utf8_message_is_read_lossily() {
        let (dir, repo) = create_test_repo();
        let raw = Git2Repo::open(dir.path()).unwrap();

        let head = raw.head().unwrap().peel_to_commit().unwrap();
        let mut buffer = format!(
            "tree {}\nparent {}\nauthor Test User <test@example.com> 0 +0000\n\
             committer Test User <test@example.com> 0 +0000\nencoding ISO-8859-1\n\n",
            head.tree_id(),
            head.id()
        )
        .into_bytes();
        buffer.extend_from_slice(b"docs: caf\xe9\n");

        let oid = raw.odb().unwrap().write(git2::ObjectType::Commit, &buffer).unwrap();
        raw.reference("refs/heads/latin", oid, true, "latin-1 commit")
            .unwrap();

        let (_, message) = repo.get_commit_message("latin").unwrap();
        assert_eq!(message, "docs: caf\u{FFFD}\n");

        let commits = repo.get_commits_in_range("HEAD..latin").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, message);
    }

    #[test]
    fn test_hooks_dir_default() {
        let (_dir, repo) = create_test_repo();
        assert!(repo.hooks_dir().ends_with("hooks"));
    }
}
