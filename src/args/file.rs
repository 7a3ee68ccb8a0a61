//! File-system domain for file arguments.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use super::argument::FileBasis;

impl FileBasis {
    /// Absolute terms are taken as-is, relative ones join the base dir.
    pub fn resolve(&self, term: &str) -> PathBuf {
        let path = Path::new(term);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    fn pruned(&self, entry_name: &str) -> bool {
        self.prune.iter().any(|re| re.is_match(entry_name))
    }

    /// Candidates for `prefix`, produced lazily.
    ///
    /// Non-recursive listing covers the directory named by the prefix's
    /// leading path. Recursive listing walks the whole base directory
    /// breadth-first, which substring matching needs since any segment may
    /// match. Directories are offered with a trailing `/`.
    pub(crate) fn candidates(&self, prefix: &str, recursive: bool) -> FileWalk<'_> {
        let dir_part = match prefix.rfind('/') {
            Some(i) => &prefix[..=i],
            None => "",
        };
        let mut pending = VecDeque::new();
        if recursive && !Path::new(prefix).is_absolute() {
            pending.push_back(String::new());
        } else {
            pending.push_back(dir_part.to_string());
        }
        FileWalk {
            basis: self,
            pending,
            ready: VecDeque::new(),
            recursive: recursive && !Path::new(prefix).is_absolute(),
        }
    }
}

/// Lazy directory enumeration. Reads one directory at a time so the
/// caller's deadline can interrupt a large walk.
pub(crate) struct FileWalk<'b> {
    basis: &'b FileBasis,
    /// Directory prefixes (as typed, ending in `/` or empty) still to read.
    pending: VecDeque<String>,
    ready: VecDeque<String>,
    recursive: bool,
}

impl FileWalk<'_> {
    fn read_next_dir(&mut self) -> bool {
        let Some(dir) = self.pending.pop_front() else {
            return false;
        };
        let listing = self.basis.resolve(if dir.is_empty() { "." } else { &dir });
        let Ok(entries) = fs::read_dir(&listing) else {
            tracing::trace!(dir = %listing.display(), "unreadable directory skipped");
            return true;
        };
        let mut names: Vec<(String, bool)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let is_dir = entry.path().is_dir();
                Some((name, is_dir))
            })
            .filter(|(name, _)| !self.basis.pruned(name))
            .collect();
        names.sort();
        for (name, is_dir) in names {
            let relative = format!("{}{}", dir, name);
            if is_dir {
                let as_dir = format!("{}/", relative);
                if self.recursive {
                    self.pending.push_back(as_dir.clone());
                }
                self.ready.push_back(as_dir);
            } else {
                self.ready.push_back(relative);
            }
        }
        true
    }
}

impl Iterator for FileWalk<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(next) = self.ready.pop_front() {
                return Some(next);
            }
            if !self.read_next_dir() {
                return None;
            }
        }
    }
}
