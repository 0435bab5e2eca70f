use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{Error, Repository, Result, FORMAT_VERSION};
use crate::config::ConfigStore;

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Creates a new, empty repository on the local file system using the
    /// default [`GitConfig`](crate::config::GitConfig) store.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        Self::init_with(work_dir)
    }
}

impl<C: ConfigStore> Repository<C> {
    /// Creates a new, empty repository at `work_dir`.
    ///
    /// `work_dir` must either not exist (it is created) or be an empty
    /// directory. Steps run in a fixed order and the first failure aborts.
    /// Anything created before the failure is left on disk.
    pub fn init_with<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let mut repo = Self::open_with(work_dir, true)?;

        prepare_work_dir(&repo.work_dir)?;

        repo.ensure_dir(true, &["branches"])?;
        repo.ensure_dir(true, &["objects"])?;
        repo.ensure_dir(true, &["refs", "tags"])?;
        repo.ensure_dir(true, &["refs", "heads"])?;

        create_description(&repo)?;
        create_head(&repo)?;
        repo.config = Some(create_config(&repo)?);

        info!(path = %repo.control_dir.display(), "initialized empty repository");

        Ok(repo)
    }
}

fn prepare_work_dir(work_dir: &Path) -> Result<()> {
    match fs::metadata(work_dir) {
        Ok(meta) => {
            if !meta.is_dir() {
                return Err(Error::NotADirectory(work_dir.to_path_buf()));
            }
            if fs::read_dir(work_dir)?.next().is_some() {
                return Err(Error::DirectoryNotEmpty(work_dir.to_path_buf()));
            }
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %work_dir.display(), "creating work tree");
            fs::create_dir_all(work_dir).map_err(|e| e.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn create_description<C: ConfigStore>(repo: &Repository<C>) -> Result<PathBuf> {
    let desc_path = repo.ensure_file(false, &["description"])?;
    fs::write(&desc_path, DESCRIPTION)?;
    Ok(desc_path)
}

fn create_head<C: ConfigStore>(repo: &Repository<C>) -> Result<PathBuf> {
    let head_path = repo.ensure_file(false, &["HEAD"])?;
    fs::write(&head_path, format!("ref: refs/heads/{}\n", DEFAULT_BRANCH))?;
    Ok(head_path)
}

fn create_config<C: ConfigStore>(repo: &Repository<C>) -> Result<C> {
    let config_path = repo.ensure_file(false, &["config"])?;
    fs::write(&config_path, "")?;

    let mut config = C::load(&config_path).map_err(|source| Error::ConfigurationUnreadable {
        path: config_path.clone(),
        source,
    })?;

    config.set("core", "repositoryformatversion", &FORMAT_VERSION.to_string());
    config.set("core", "filemode", "false");
    config.set("core", "bare", "false");

    config
        .save(&config_path)
        .map_err(|source| Error::ConfigurationUnwritable {
            path: config_path,
            source,
        })?;

    Ok(config)
}
