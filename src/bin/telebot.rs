use std::{path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use url::Url;
use wagdev::{
    logging,
    telemetry::{Bot, Conf, SessionId},
};

/// Generates language guide searches and synthetic telemetry for one session.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Root URL of the middleware.
    #[arg(long, default_value = "http://localhost:3010")]
    root_url: Url,

    /// How many times to repeat the request and telemetry cycle.
    #[arg(long, default_value_t = 10)]
    repeat: usize,

    /// Telemetry time window and pause between cycles, in seconds.
    #[arg(long, default_value_t = 2)]
    telemetry_duration: u64,

    /// JSON file with queries and action counts.
    #[arg(long, default_value = "telebot-conf.json")]
    telemetry_conf: PathBuf,

    /// Session identifier, random when not given.
    #[arg(long)]
    session_id: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let args = Args::parse();

    let conf = Conf::load(&args.telemetry_conf)?;
    let mut rng = StdRng::from_os_rng();

    let session = match args.session_id {
        Some(id) => SessionId::from(id),
        None => SessionId::random(&mut rng),
    };

    let mut bot = Bot::new(
        args.root_url,
        session,
        conf,
        Duration::from_secs(args.telemetry_duration),
        rng,
    )?;

    tracing::info!("Session {}", bot.session());
    bot.run(args.repeat).await?;

    Ok(())
}
