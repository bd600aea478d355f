use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use wagdev::{
    config::{self, default},
    logging, Server,
};

/// Serves language guide fixtures selected by the `slovo` query parameter.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = default::FIXTURES_LISTEN)]
    listen: SocketAddr,

    /// Directory containing the fixture files.
    #[arg(long, default_value = default::FIXTURES_BASE_PATH)]
    base_path: PathBuf,

    /// TOML server description, replaces the other options.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => config::Server::load(path)?,
        None => config::Server::fixtures(args.listen, args.base_path),
    };

    Server::init(config)?
        .shutdown_on(tokio::signal::ctrl_c())
        .run()
        .await?;

    Ok(())
}
