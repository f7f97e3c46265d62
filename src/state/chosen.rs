/// The output directory holding one link per accepted image
///
/// Each marker is a symlink named after the source filename and pointing
/// at the source's full path. Only symlinks count as markers (dangling ones
/// included); any other entry sharing a name is left alone.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PersistError, ViewerError};

#[derive(Debug, Clone)]
pub struct ChosenDir {
    dir: PathBuf,
}

/// What currently sits at a marker path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Missing,
    Marker,
    /// A regular file or directory the user put there
    Foreign,
}

impl ChosenDir {
    /// Open `<root>/<name>`, creating it if absent
    pub fn open(root: &Path, name: &str) -> Result<Self, ViewerError> {
        let dir = root.join(name);

        fs::create_dir_all(&dir).map_err(|source| ViewerError::OutputDirectory {
            path: dir.clone(),
            source,
        })?;

        // create_dir_all succeeds on an existing symlink-to-file in some cases
        if !dir.is_dir() {
            return Err(ViewerError::OutputDirectory {
                path: dir,
                source: io::Error::new(io::ErrorKind::Other, "not a directory"),
            });
        }

        tracing::debug!(dir = %dir.display(), "Output directory ready");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn marker_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    fn entry(&self, filename: &str) -> Entry {
        match fs::symlink_metadata(self.marker_path(filename)) {
            Ok(meta) if meta.file_type().is_symlink() => Entry::Marker,
            Ok(_) => Entry::Foreign,
            Err(_) => Entry::Missing,
        }
    }

    #[cfg(test)]
    pub fn has_marker(&self, filename: &str) -> bool {
        self.entry(filename) == Entry::Marker
    }

    /// Create a marker for `filename` pointing at `target`.
    /// An existing marker is replaced; a non-link entry is refused and kept.
    pub fn link(&self, filename: &str, target: &Path) -> Result<(), PersistError> {
        let marker = self.marker_path(filename);
        let wrap = |source| PersistError::Link {
            filename: filename.to_string(),
            source,
        };

        match self.entry(filename) {
            Entry::Missing => {}
            Entry::Marker => fs::remove_file(&marker).map_err(wrap)?,
            Entry::Foreign => return Err(wrap(not_a_marker())),
        }
        make_symlink(target, &marker).map_err(wrap)
    }

    /// Remove the marker for `filename`. Returns whether one existed.
    /// A non-link entry under that name is refused and kept.
    pub fn unlink(&self, filename: &str) -> Result<bool, PersistError> {
        let wrap = |source| PersistError::Unlink {
            filename: filename.to_string(),
            source,
        };

        match self.entry(filename) {
            Entry::Missing => return Ok(false),
            Entry::Foreign => return Err(wrap(not_a_marker())),
            Entry::Marker => {}
        }

        match fs::remove_file(self.marker_path(filename)) {
            Ok(()) => Ok(true),
            // Deleted behind our back between the check and the remove
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(wrap(source)),
        }
    }

    /// Names of every marker currently in the directory
    pub fn markers(&self) -> io::Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_symlink() {
                names.insert(entry.file_name().to_string_lossy().to_string());
            }
        }
        Ok(names)
    }
}

fn not_a_marker() -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, "entry is not a link marker")
}

#[cfg(unix)]
pub(crate) fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
pub(crate) fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
