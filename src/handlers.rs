//! Built-in directory handlers and the workspace they act on.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use serde::Serialize;

use crate::config::DirHandler;

/// Which working directory a handler changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CwdScope {
    /// The editor-wide (or process-wide) working directory.
    Global,
    /// The working directory of the current window only.
    Window,
}

/// The environment whose working directory the handlers change.
pub trait Workspace: Send + Sync {
    fn change_dir(&self, scope: CwdScope, path: &Path) -> anyhow::Result<()>;
}

/// Change the global working directory.
pub fn cd(workspace: Arc<dyn Workspace>) -> DirHandler {
    scoped(workspace, CwdScope::Global)
}

/// Change the window-local working directory.
pub fn tcd(workspace: Arc<dyn Workspace>) -> DirHandler {
    scoped(workspace, CwdScope::Window)
}

fn scoped(workspace: Arc<dyn Workspace>, scope: CwdScope) -> DirHandler {
    Arc::new(move |path: &str| {
        log::debug!("changing {scope:?} working directory to {path}");
        workspace.change_dir(scope, Path::new(path))
    })
}

pub const BUILTIN_HANDLERS: &[&str] = &["cd", "tcd"];

/// Look up a built-in handler by the name used in configuration files.
pub fn handler_by_name(name: &str, workspace: Arc<dyn Workspace>) -> Option<DirHandler> {
    match name {
        "cd" => Some(cd(workspace)),
        "tcd" => Some(tcd(workspace)),
        _ => None,
    }
}

/// A requested working directory change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CwdChange {
    pub scope: CwdScope,
    pub path: PathBuf,
}

/// Workspace for a standalone process: a child cannot change its parent
/// shell's directory, so the change is recorded and acted on after the picker
/// exits.
#[derive(Debug, Default)]
pub struct ShellWorkspace {
    last: Mutex<Option<CwdChange>>,
}

impl ShellWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the most recent change, leaving nothing recorded.
    pub fn take(&self) -> Option<CwdChange> {
        self.last.lock().ok().and_then(|mut last| last.take())
    }
}

impl Workspace for ShellWorkspace {
    fn change_dir(&self, scope: CwdScope, path: &Path) -> anyhow::Result<()> {
        let mut last = self
            .last
            .lock()
            .map_err(|_| anyhow!("workspace state is poisoned"))?;
        *last = Some(CwdChange {
            scope,
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_record_their_scope() {
        let workspace = Arc::new(ShellWorkspace::new());
        cd(workspace.clone())("/tmp/x").expect("cd");
        assert_eq!(
            workspace.take(),
            Some(CwdChange {
                scope: CwdScope::Global,
                path: PathBuf::from("/tmp/x"),
            })
        );

        tcd(workspace.clone())("/srv").expect("tcd");
        assert_eq!(workspace.take().map(|change| change.scope), Some(CwdScope::Window));
        assert_eq!(workspace.take(), None);
    }

    #[test]
    fn names_resolve_to_builtins() {
        let workspace: Arc<dyn Workspace> = Arc::new(ShellWorkspace::new());
        for name in BUILTIN_HANDLERS {
            assert!(handler_by_name(name, Arc::clone(&workspace)).is_some(), "{name}");
        }
        assert!(handler_by_name("rm", workspace).is_none());
    }

    #[test]
    fn scope_serialises_lowercase() {
        let change = CwdChange {
            scope: CwdScope::Window,
            path: PathBuf::from("/srv"),
        };
        let json = serde_json::to_string(&change).expect("json");
        assert_eq!(json, r#"{"scope":"window","path":"/srv"}"#);
    }
}
