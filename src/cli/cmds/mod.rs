use std::io::Write;

use thiserror::Error;

use crate::{App, Result};

mod init;

const USAGE_HINT: &str = "Please supply a command. Run `tinygit --help` for usage.";

/// Returned when the first argument names no known subcommand.
#[derive(Debug, Error)]
#[error("{0:?} is not a valid command.")]
pub(crate) struct UnknownCommand(pub String);

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(init::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("init", Some(m)) => init::run(app, m),
        ("", None) => {
            writeln!(app, "{}", USAGE_HINT)?;
            Ok(())
        }
        (other, _) => Err(UnknownCommand(other.to_owned()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_prints_hint() {
        let args: Vec<&str> = vec![];
        let stdout = App::run_with_args(args).unwrap();
        assert_eq!(stdout, format!("{}\n", USAGE_HINT).as_bytes());
    }

    #[test]
    fn unknown_subcommand() {
        let err = App::run_with_args(vec!["commit", "-m", "hello"]).unwrap_err();

        let unknown = err.downcast_ref::<UnknownCommand>().unwrap();
        assert_eq!(unknown.0, "commit");
        assert_eq!(err.to_string(), "\"commit\" is not a valid command.");
    }
}
