//! Lexical path composition for repository-relative locations.
//!
//! Nothing in this module touches the file system. Redundant separators and
//! `.` components are dropped, but symlinks are never followed and `..`
//! components are kept as written.

use std::path::{Component, Path, PathBuf};

/// Join `segments` relative to nothing.
///
/// A segment may itself contain separators (`"refs/heads"`). Root and prefix
/// components inside a segment are ignored, so the result is always relative.
/// Zero segments yields an empty path.
pub fn join_segments<S: AsRef<Path>>(segments: &[S]) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in segments {
        push_relative(&mut path, segment.as_ref());
    }
    path
}

/// Join `segments` onto `root`.
///
/// Zero segments yields `root` itself (lexically normalized).
pub fn resolve<S: AsRef<Path>>(root: &Path, segments: &[S]) -> PathBuf {
    let mut path = normalize(root);
    for segment in segments {
        push_relative(&mut path, segment.as_ref());
    }
    path
}

/// Drop redundant separators and `.` components from `path`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            c => out.push(c.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        // A path made only of `.` components.
        out.push(Component::CurDir.as_os_str());
    }

    out
}

fn push_relative(out: &mut PathBuf, segment: &Path) {
    for component in segment.components() {
        match component {
            Component::Normal(name) => out.push(name),
            Component::ParentDir => out.push(Component::ParentDir.as_os_str()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
}
