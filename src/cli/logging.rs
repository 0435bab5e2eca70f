use std::io;

use tracing_subscriber::EnvFilter;

// Install a stderr subscriber. `RUST_LOG` is honored unless `verbose` is set,
// which forces debug output for this crate.
pub(crate) fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tinygit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (in tests, say). That's fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
