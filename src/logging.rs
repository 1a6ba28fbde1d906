use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` picks the level, `warn` otherwise,
/// so stdout stays reserved for the plan itself.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A tracing subscriber was already installed; keeping it.");
    }
}
