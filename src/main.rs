mod cli;
mod client;
mod listing;
mod post;
mod provider;
mod readtime;
mod richtext;
mod server;
mod util;

use clap::Parser;

use crate::util::Result;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  #[cfg(unix)]
  {
    tokio::spawn(async {
      signal_handler().await.expect("Signal handler failed");
    });
  }

  let cli = cli::Cli::parse();
  cli.run().await
}

#[cfg(unix)]
async fn signal_handler() -> Result<()> {
  use tokio::signal::unix::{SignalKind, signal};
  use tracing::info;

  let mut sigint = signal(SignalKind::interrupt())?;
  let mut sigterm = signal(SignalKind::terminate())?;

  tokio::select! {
    _ = sigint.recv() => {
      info!("Received SIGINT, shutting down...");
    }
    _ = sigterm.recv() => {
      info!("Received SIGTERM, shutting down...");
    }
  };

  std::process::exit(0)
}
