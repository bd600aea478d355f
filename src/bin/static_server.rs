use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use wagdev::{
    config::{self, default},
    logging, Server,
};

/// Answers every GET request with the contents of a single file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File returned for every request.
    #[arg(required_unless_present = "config")]
    doc_path: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, default_value = default::FILE_LISTEN)]
    listen: SocketAddr,

    /// TOML server description, replaces the other options.
    #[arg(long, conflicts_with = "doc_path")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let args = Args::parse();

    let config = match (args.config, args.doc_path) {
        (Some(path), _) => config::Server::load(path)?,
        (None, Some(doc_path)) => config::Server::file(args.listen, doc_path),
        (None, None) => return Err("a document path or --config is required".into()),
    };

    Server::init(config)?
        .shutdown_on(tokio::signal::ctrl_c())
        .run()
        .await?;

    Ok(())
}
