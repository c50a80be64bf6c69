// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and managing git hooks.

use crate::config::HooksConfig;
use crate::error::{HookError, LintError, Result};
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{HookTemplate, HOOK_MARKER};

/// Manager for git hooks.
pub struct HookManager {
    hooks_dir: PathBuf,
    config: HooksConfig,
}

impl HookManager {
    /// Create a new hook manager for the current repository.
    pub fn new(config: HooksConfig) -> Result<Self> {
        let repo = git::open_repo()?;
        Ok(Self::with_dir(repo.hooks_dir(), config))
    }

    /// Create a hook manager for an explicit hooks directory.
    pub fn with_dir(hooks_dir: impl Into<PathBuf>, config: HooksConfig) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            config,
        }
    }

    /// Install a specific hook.
    pub fn install_hook(&self, hook_name: &str, force: bool) -> Result<()> {
        let template = parse_hook(hook_name)?;
        self.install_template(&template, force)
    }

    /// Install all hooks.
    pub fn install_all(&self, force: bool) -> Result<()> {
        for template in HookTemplate::all() {
            self.install_template(template, force)?;
        }
        Ok(())
    }

    /// Install a hook from a template.
    fn install_template(&self, template: &HookTemplate, force: bool) -> Result<()> {
        let hook = template.filename();
        let hook_path = self.hooks_dir.join(hook);
        let backup_path = self.backup_path(template);

        if !self.hooks_dir.exists() {
            fs::create_dir_all(&self.hooks_dir)
                .map_err(|e| install_failed(hook, "create hooks directory", e))?;
        }

        let foreign = hook_path.exists() && !self.is_own_hook(&hook_path)?;
        if foreign && !force {
            return Err(LintError::Hook(HookError::AlreadyExists {
                hook: hook.to_string(),
            }));
        }

        // Keep a foreign hook so uninstall can restore it
        if foreign {
            tracing::debug!("Backing up existing {} hook", hook);
            fs::rename(&hook_path, &backup_path)
                .map_err(|e| install_failed(hook, "back up existing hook", e))?;
        }

        let script = template.generate(&self.config)?;
        fs::write(&hook_path, &script).map_err(|e| install_failed(hook, "write hook", e))?;
        make_executable(&hook_path).map_err(|e| install_failed(hook, "set permissions", e))?;

        tracing::debug!("Installed {} hook at {:?}", hook, hook_path);
        Ok(())
    }

    /// Uninstall a specific hook.
    pub fn uninstall_hook(&self, hook_name: &str) -> Result<()> {
        let template = parse_hook(hook_name)?;
        let hook_path = self.hooks_dir.join(template.filename());
        let backup_path = self.backup_path(&template);

        if !hook_path.exists() {
            return Ok(());
        }

        if !self.is_own_hook(&hook_path)? {
            return Err(LintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: "Hook was not installed by cklint".to_string(),
            }));
        }

        fs::remove_file(&hook_path).map_err(|e| {
            LintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        if backup_path.exists() {
            if let Err(e) = fs::rename(&backup_path, &hook_path) {
                tracing::warn!("Failed to restore {:?}: {}", backup_path, e);
            }
        }

        Ok(())
    }

    /// Uninstall all hooks.
    pub fn uninstall_all(&self) -> Result<()> {
        for template in HookTemplate::all() {
            self.uninstall_hook(template.filename())?;
        }
        Ok(())
    }

    /// Get the status of all hooks.
    pub fn status(&self) -> Result<Vec<(String, bool)>> {
        let mut status = Vec::new();

        for template in HookTemplate::all() {
            let hook_path = self.hooks_dir.join(template.filename());
            let installed = hook_path.exists() && self.is_own_hook(&hook_path)?;
            status.push((template.filename().to_string(), installed));
        }

        Ok(status)
    }

    fn backup_path(&self, template: &HookTemplate) -> PathBuf {
        self.hooks_dir
            .join(format!("{}.backup", template.filename()))
    }

    /// Check if a hook was installed by cklint.
    fn is_own_hook(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path)?;
        Ok(content.contains(HOOK_MARKER))
    }
}

fn parse_hook(hook_name: &str) -> Result<HookTemplate> {
    hook_name.parse::<HookTemplate>().map_err(|_| {
        LintError::Hook(HookError::NotFound {
            hook: hook_name.to_string(),
        })
    })
}

fn install_failed(hook: &str, action: &str, err: std::io::Error) -> LintError {
    LintError::Hook(HookError::InstallFailed {
        hook: hook.to_string(),
        message: format!("Failed to {}: {}", action, err),
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> HookManager {
        HookManager::with_dir(dir.path().join("hooks"), HooksConfig::default())
    }

    #[test]
    fn test_install_and_status() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        assert_eq!(manager.status().unwrap(), vec![("commit-msg".to_string(), false)]);
        manager.install_all(false).unwrap();
        assert_eq!(manager.status().unwrap(), vec![("commit-msg".to_string(), true)]);

        let script = fs::read_to_string(dir.path().join("hooks/commit-msg")).unwrap();
        assert!(script.contains("lint --edit"));
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_hook_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        manager(&dir).install_hook("commit-msg", false).unwrap();
        let mode = fs::metadata(dir.path().join("hooks/commit-msg"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_reinstall_own_hook_without_force() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.install_all(false).unwrap();
        assert!(manager.install_all(false).is_ok());
    }

    #[test]
    fn test_foreign_hook_requires_force_and_is_restored() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        let hooks = dir.path().join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("commit-msg"), "#!/bin/sh\necho custom\n").unwrap();

        assert!(matches!(
            manager.install_hook("commit-msg", false),
            Err(LintError::Hook(HookError::AlreadyExists { .. }))
        ));

        manager.install_hook("commit-msg", true).unwrap();
        assert!(hooks.join("commit-msg.backup").exists());

        manager.uninstall_hook("commit-msg").unwrap();
        let restored = fs::read_to_string(hooks.join("commit-msg")).unwrap();
        assert!(restored.contains("echo custom"));
        assert!(!hooks.join("commit-msg.backup").exists());
    }

    #[test]
    fn test_uninstall_refuses_foreign_hook() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        let hooks = dir.path().join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("commit-msg"), "#!/bin/sh\n").unwrap();

        assert!(manager.uninstall_hook("commit-msg").is_err());
    }

    #[test]
    fn test_unknown_hook() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            manager(&dir).install_hook("pre-push", false),
            Err(LintError::Hook(HookError::NotFound { .. }))
        ));
    }
}
