use anyhow::Result;
use tracing::info;

use rookery_cli::Session;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only protocol responses.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!(version = env!("CARGO_PKG_VERSION"), "rookery starting");
    Session::new().run()?;
    Ok(())
}
