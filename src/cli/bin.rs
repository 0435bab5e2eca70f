use std::{
    error::Error,
    io::{self, Write},
};

mod app;
pub(crate) use app::App;

mod cmds;
mod logging;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Keep this function as small as possible. Everything else is reachable
    // from in-process tests through `App`.

    let arg_matches = app::clap_app().get_matches();
    logging::init(app::verbose(&arg_matches));

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches,
        stdout: &mut stdout,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            if let Some(usage) = err.downcast_ref::<cmds::UnknownCommand>() {
                eprintln!("{}", usage);
                EXIT_USAGE
            } else {
                eprintln!("ERROR: {}", err);
                EXIT_FAILURE
            }
        }
    });
}
