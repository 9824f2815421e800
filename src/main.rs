//! rVenue main entrypoint.

use rvenue::run;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; user-facing output stays on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RVENUE_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    println!();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
