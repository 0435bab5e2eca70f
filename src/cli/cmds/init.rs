use std::{env, io::Write, path::PathBuf};

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository")
        .arg(
            Arg::with_name("directory")
                .help("The directory to initialize (defaults to the current directory)"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Only print error messages"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let path = match init_matches.value_of_os("directory") {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()?,
    };

    let repo = Repository::init(&path)?;

    if !init_matches.is_present("quiet") {
        writeln!(
            app,
            "Initialized empty repository in {}",
            repo.control_dir().display()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::App;

    use tinygit::repo::{Error, Repository};

    #[test]
    fn creates_repo() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("repo");
        let pathstr = path.to_str().unwrap();

        let stdout = App::run_with_args(vec!["init", pathstr]).unwrap();

        let expected = format!(
            "Initialized empty repository in {}\n",
            path.join(".git").display()
        );
        assert_eq!(stdout, expected.as_bytes());

        let repo = Repository::open(&path, false).unwrap();
        assert_eq!(repo.format_version(), Some(0));
    }

    #[test]
    fn quiet() {
        let tempdir = tempfile::tempdir().unwrap();
        let pathstr = tempdir.path().to_str().unwrap();

        let stdout = App::run_with_args(vec!["init", "-q", pathstr]).unwrap();

        assert!(stdout.is_empty());
        assert!(tempdir.path().join(".git/HEAD").is_file());
    }

    #[test]
    fn error_not_empty() {
        let tempdir = tempfile::tempdir().unwrap();
        fs::write(tempdir.path().join("file"), "x").unwrap();
        let pathstr = tempdir.path().to_str().unwrap();

        let err = App::run_with_args(vec!["init", pathstr]).unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::DirectoryNotEmpty(_)) => {}
            _ => panic!("wrong error: {:?}", err),
        }
        assert!(err.to_string().ends_with("is not empty"));
    }

    #[test]
    fn error_too_many_args() {
        let err = App::run_with_args(vec!["init", "here", "and there"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("wasn't expected"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
