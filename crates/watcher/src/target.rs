//! Watched file bookkeeping
//!
//! OS watchers are directory-scoped, so each watched file is stored as its
//! parent directory plus file name. Matching compares both parts.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A single watched file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    /// Canonical parent directory
    dir: PathBuf,
    /// File name inside `dir`
    file_name: OsString,
}

impl WatchTarget {
    /// Build a target from a file path
    ///
    /// The file itself does not need to exist yet, but its parent directory
    /// must: it is canonicalized so that event paths reported by the OS
    /// (which are absolute, and resolved on some platforms) compare equal.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .with_context(|| format!("Watched path has no file name: {}", path.display()))?
            .to_os_string();

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let dir = parent.canonicalize().with_context(|| {
            format!("Failed to resolve watched directory: {}", parent.display())
        })?;

        Ok(Self { dir, file_name })
    }

    /// Parent directory being watched
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Watched file name
    pub fn file_name(&self) -> &std::ffi::OsStr {
        &self.file_name
    }

    /// Full path of the watched file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Check whether an event path refers to this file
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name() == Some(self.file_name.as_os_str()) && path.parent() == Some(self.dir.as_path())
    }
}

/// The full set of watched files
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    targets: Vec<WatchTarget>,
}

impl WatchSet {
    /// Create a set, dropping duplicate targets
    pub fn new(targets: impl IntoIterator<Item = WatchTarget>) -> Self {
        let mut set = Self::default();
        for target in targets {
            if !set.targets.contains(&target) {
                set.targets.push(target);
            }
        }
        set
    }

    /// Resolve a list of file paths into a set
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let targets = paths
            .iter()
            .map(|p| WatchTarget::from_path(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(targets))
    }

    /// Return the target matching `path`, if any
    pub fn find(&self, path: &Path) -> Option<&WatchTarget> {
        self.targets.iter().find(|t| t.matches(path))
    }

    /// Check whether `path` is one of the watched files
    pub fn matches(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    /// Distinct parent directories, in insertion order
    pub fn directories(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for target in &self.targets {
            if !dirs.contains(&target.dir()) {
                dirs.push(target.dir());
            }
        }
        dirs
    }

    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}
