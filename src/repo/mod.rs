//! A repository that stores its metadata in a `.git` control directory on the
//! local file system.
//!
//! A [`Repository`] is a short-lived handle. It is created by
//! [`Repository::open`] (which validates an existing layout) or
//! [`Repository::init`] (which lays down a new one), used for a single
//! operation, and dropped. It holds no open files or locks.
//!
//! The configuration store is a type parameter. [`GitConfig`] is used unless
//! the caller supplies another [`ConfigStore`] through
//! [`Repository::open_with`] or [`Repository::init_with`].

mod error;
pub use error::{Error, Result};

mod init;

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    config::{ConfigStore, GitConfig},
    path,
};

/// Name of the control directory within the work tree.
pub const CONTROL_DIR_NAME: &str = ".git";

/// The only `core.repositoryformatversion` this crate understands.
pub const FORMAT_VERSION: i64 = 0;

/// Handle to a repository on the local file system.
///
/// `control_dir` is always `work_dir` joined with [`CONTROL_DIR_NAME`].
#[derive(Debug)]
pub struct Repository<C = GitConfig> {
    work_dir: PathBuf,
    control_dir: PathBuf,
    config: Option<C>,
}

impl Repository {
    /// Open the repository rooted at `work_dir` using the default
    /// [`GitConfig`] store.
    ///
    /// See [`Repository::open_with`] for the validation performed.
    pub fn open<P: AsRef<Path>>(work_dir: P, force: bool) -> Result<Self> {
        Self::open_with(work_dir, force)
    }
}

impl<C: ConfigStore> Repository<C> {
    /// Open the repository rooted at `work_dir`.
    ///
    /// Unless `force` is set, the control directory must exist, its `config`
    /// file must exist and parse, and `core.repositoryformatversion` must be
    /// `0`. With `force` set, none of that is checked and the handle may
    /// point at a layout that doesn't exist yet. In either mode, a `config`
    /// file that exists but can't be loaded is an error.
    ///
    /// A relative `work_dir` is resolved against the current directory.
    pub fn open_with<P: AsRef<Path>>(work_dir: P, force: bool) -> Result<Self> {
        let work_dir = absolute(work_dir.as_ref())?;
        let control_dir = work_dir.join(CONTROL_DIR_NAME);

        debug!(work_dir = %work_dir.display(), force, "opening repository");

        if !force && !control_dir.is_dir() {
            return Err(Error::NotARepository(control_dir));
        }

        let mut repo = Repository {
            work_dir,
            control_dir,
            config: None,
        };

        match repo.ensure_file(false, &["config"]) {
            Ok(config_path) => match fs::metadata(&config_path) {
                Ok(_) => {
                    let config = C::load(&config_path).map_err(|source| {
                        Error::ConfigurationUnreadable {
                            path: config_path.clone(),
                            source,
                        }
                    })?;
                    repo.config = Some(config);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    if !force {
                        return Err(Error::ConfigurationMissing(config_path));
                    }
                }
                Err(err) => {
                    return Err(Error::ConfigurationUnreadable {
                        path: config_path,
                        source: err.into(),
                    });
                }
            },
            Err(_) if force => {}
            Err(_) => return Err(Error::ConfigurationMissing(repo.control_path(&["config"]))),
        }

        if !force {
            repo.check_format_version()?;
        }

        Ok(repo)
    }

    /// Return the work tree root.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the control directory.
    pub fn control_dir(&self) -> &Path {
        self.control_dir.as_path()
    }

    /// Return the loaded configuration store, if any.
    ///
    /// This is always `Some` for a handle opened in strict mode or returned
    /// by `init`. A forced open of a layout without a `config` file has none.
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Return `core.repositoryformatversion` from the loaded configuration.
    pub fn format_version(&self) -> Option<i64> {
        self.config
            .as_ref()?
            .get_int("core", "repositoryformatversion")
    }

    /// Join `segments` onto the control directory.
    ///
    /// Purely lexical. Zero segments yields the control directory itself.
    pub fn control_path<S: AsRef<Path>>(&self, segments: &[S]) -> PathBuf {
        path::resolve(&self.control_dir, segments)
    }

    /// Join `segments` onto the work tree root.
    pub fn work_path<S: AsRef<Path>>(&self, segments: &[S]) -> PathBuf {
        path::resolve(&self.work_dir, segments)
    }

    /// Return the directory at `segments` within the control directory.
    ///
    /// If nothing exists there and `mkdir` is set, the directory is created
    /// along with any missing ancestors. Otherwise a missing directory is
    /// `Error::PathMissing` and a non-directory is `Error::PathConflict`.
    pub fn ensure_dir<S: AsRef<Path>>(&self, mkdir: bool, segments: &[S]) -> Result<PathBuf> {
        let path = self.control_path(segments);

        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => Ok(path),
            Ok(_) => Err(Error::PathConflict(path)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if mkdir {
                    debug!(path = %path.display(), "creating directory");
                    fs::create_dir_all(&path)?;
                    Ok(path)
                } else {
                    Err(Error::PathMissing(path))
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Return the path of the file at `segments` within the control directory.
    ///
    /// Only the parent directory is checked (and created if `mkdir` is set),
    /// via [`ensure_dir`](Self::ensure_dir). The file itself may or may not
    /// exist; reading or creating it is up to the caller.
    pub fn ensure_file<S: AsRef<Path>>(&self, mkdir: bool, segments: &[S]) -> Result<PathBuf> {
        let (_, parent) = segments.split_last().ok_or(Error::EmptyFilePath)?;
        self.ensure_dir(mkdir, parent)?;
        Ok(self.control_path(segments))
    }

    fn check_format_version(&self) -> Result<()> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| Error::ConfigurationMissing(self.control_path(&["config"])))?;

        if config.get_int("core", "repositoryformatversion") == Some(FORMAT_VERSION) {
            Ok(())
        } else {
            let found = config.get("core", "repositoryformatversion");
            Err(Error::UnsupportedFormatVersion(found.map(str::to_owned)))
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path::normalize(path))
    } else {
        Ok(path::normalize(&env::current_dir()?.join(path)))
    }
}
