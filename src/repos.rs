use crate::error::{Result, StatsError};
use crate::git::HistoryReader;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_FILE_NAME: &str = ".gitcontrib";

const IGNORED_DIRS: [&str; 3] = ["vendor", "node_modules", "venv"];

pub fn should_be_ignored(folder_name: &str) -> bool {
    IGNORED_DIRS.contains(&folder_name)
}

/// Flat file of repository paths, one per line.
#[derive(Debug, Clone)]
pub struct RepoList {
    path: PathBuf,
}

impl RepoList {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `~/.gitcontrib`
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_FILE_NAME))
            .ok_or_else(|| StatsError::Io(io::Error::new(io::ErrorKind::NotFound, "home directory not found")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in file order; a missing file is an empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append the entries not already listed and return them.
    pub fn add(&self, repos: &[String]) -> Result<Vec<String>> {
        let mut existing = self.load()?;
        let mut added = Vec::new();
        for repo in repos {
            if !existing.contains(repo) {
                existing.push(repo.clone());
                added.push(repo.clone());
            }
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, existing.join("\n"))?;
        Ok(added)
    }

    /// What `stat` scans when no folder is given: the list, or `.` when the
    /// list is empty or the current directory is itself a repository.
    pub fn folders_to_scan(&self) -> Result<Vec<PathBuf>> {
        let repos = self.load()?;
        if repos.is_empty() || HistoryReader::is_repo(".") {
            return Ok(vec![PathBuf::from(".")]);
        }
        Ok(repos.into_iter().map(PathBuf::from).collect())
    }
}

/// Every directory under `folder` holding a `.git` entry, skipping vendored
/// dependency trees.
pub fn scan_git_folders(folder: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(folder)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            name != ".git" && !should_be_ignored(&name)
        })
        .build();

    let mut folders = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }
        if entry.path().join(".git").exists() {
            let found = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
            debug!(folder = %found.display(), "found repository");
            folders.push(found);
        }
    }
    Ok(folders)
}
