// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Where a commit message to lint comes from.

use std::io::Read;
use std::path::PathBuf;

use crate::error::{CommitError, LintError, Result};

/// A raw commit message source outside of git history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// Read the message from standard input.
    Stdin,
    /// Read the message from a file, e.g. `.git/COMMIT_EDITMSG`.
    File(PathBuf),
    /// Use the given text.
    Text(String),
}

impl MessageSource {
    /// Read the raw message.
    pub fn read(&self) -> Result<String> {
        match self {
            MessageSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| read_failed("stdin", e))?;
                Ok(buffer)
            }
            MessageSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| read_failed(&path.display().to_string(), e)),
            MessageSource::Text(text) => Ok(text.clone()),
        }
    }

    /// A short description for logs.
    pub fn describe(&self) -> String {
        match self {
            MessageSource::Stdin => "stdin".to_string(),
            MessageSource::File(path) => path.display().to_string(),
            MessageSource::Text(_) => "argument".to_string(),
        }
    }
}

fn read_failed(source_name: &str, err: std::io::Error) -> LintError {
    LintError::Commit(CommitError::ReadFailed {
        source_name: source_name.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text() {
        let source = MessageSource::Text("fix: x".to_string());
        assert_eq!(source.read().unwrap(), "fix: x");
    }

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "docs: update readme\n").unwrap();

        let source = MessageSource::File(path);
        assert_eq!(source.read().unwrap(), "docs: update readme\n");
    }

    #[test]
    fn test_read_missing_file() {
        let source = MessageSource::File(PathBuf::from("/nonexistent/COMMIT_EDITMSG"));
        assert!(matches!(
            source.read(),
            Err(LintError::Commit(CommitError::ReadFailed { .. }))
        ));
    }
}
