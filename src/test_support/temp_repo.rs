use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::repo::{Repository, CONTROL_DIR_NAME};

/// A `TempRepo` creates a freshly initialized repository in a temporary
/// directory that is deleted when the struct is dropped.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempRepo {
    // Initialize a repository in a `repo` directory inside a new tempdir.
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("repo");

        Repository::init(&path).unwrap();

        TempRepo { tempdir, path }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // Return the path to a file or directory inside the control directory.
    pub fn control_path(&self, rel: &str) -> PathBuf {
        self.path.join(CONTROL_DIR_NAME).join(rel)
    }

    // Replace the contents of the repo's config file.
    pub fn write_config(&self, text: &str) -> &TempRepo {
        fs::write(self.control_path("config"), text).unwrap();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::TempRepo;

    #[test]
    fn temp_path() {
        let path = {
            let r = TempRepo::new();
            let path = r.path().to_path_buf();
            assert!(r.control_path("objects").is_dir());
            path
        };

        assert!(!path.is_dir());
    }

    #[test]
    fn write_config() {
        let r = TempRepo::new();
        r.write_config("[core]\n\trepositoryformatversion = 7\n");

        let text = std::fs::read_to_string(r.control_path("config")).unwrap();
        assert_eq!(text, "[core]\n\trepositoryformatversion = 7\n");
    }
}
