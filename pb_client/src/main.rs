//! A heads-up poker bot for the Praetor match server.
//!
//! The bot checks in to one match over a WebSocket, plays every hand it is
//! dealt, and exits when the server ends the match or drops the connection.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use ctrlc::set_handler;
use log::{error, info, warn};
use pico_args::Arguments;
use praetor_bot::{
    Dispatcher, LookupEvaluator, MatchIdentity, Policy, Signer, entities::MatchId,
};

use pb_client::{
    config::{BotConfig, CliOverrides},
    logging,
    websocket_client::WebSocketClient,
};

const HELP: &str = "\
Play a heads-up match on the Praetor poker server

USAGE:
  pb_client [OPTIONS] <MATCH_ID>

OPTIONS:
  --server     URL         Match server URL  [default: env PRAETOR_SERVER_URL or wss://praetorpoker.com/gameserver]
  --log-file   PATH        Append logs to PATH instead of stderr  [default: env PRAETOR_LOG_FILE]
  --policy     NAME        starter or calling-station  [default: env PRAETOR_POLICY or starter]

FLAGS:
  --log-to-file            Log to game_log.log unless a log file is configured
  -h, --help               Print help information

ENVIRONMENT:
  PRAETOR_PLAYER_ID        Seat assigned by the server  [default: 0]
  PRAETOR_USERNAME         Username registered for the match
  PRAETOR_SECRET           Shared secret used to sign messages
  RUST_LOG                 Log filter  [default: info]
  (A .env file in the working directory is read if present)
";

struct Args {
    match_id: MatchId,
    overrides: CliOverrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        server_url: pargs.opt_value_from_str("--server")?,
        log_file: pargs.opt_value_from_str::<_, PathBuf>("--log-file")?,
        log_to_file: pargs.contains("--log-to-file"),
        policy: pargs.opt_value_from_str::<_, Policy>("--policy")?,
    };
    let args = Args {
        match_id: pargs
            .free_from_str()
            .context("Missing or invalid MATCH_ID (see --help)")?,
        overrides,
    };

    let config = BotConfig::from_env(args.match_id, args.overrides)?;
    config.validate()?;

    logging::init(config.log_file.as_deref())?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unused arguments: {remaining:?}");
    }

    // Catching signals for exit.
    set_handler(|| {
        warn!("Interrupted, exiting");
        std::process::exit(130);
    })?;

    run(config).await.inspect_err(|e| error!("{e:#}"))
}

async fn run(config: BotConfig) -> Result<()> {
    let signer = Signer::new(&config.secret).context("Invalid PRAETOR_SECRET")?;
    let identity = MatchIdentity {
        player_id: config.player_id,
        match_id: config.match_id,
        username: config.username,
    };
    info!("Playing as {identity} with the {} policy", config.policy);

    let mut dispatcher = Dispatcher::new(
        identity,
        signer,
        Arc::new(LookupEvaluator::new()),
        config.policy,
    );

    let report = WebSocketClient::new(config.server_url)
        .connect_and_play(&mut dispatcher)
        .await
        .with_context(|| {
            format!(
                "Session ended after {} hands while {}",
                dispatcher.hands_played(),
                dispatcher.phase()
            )
        })?;

    info!(
        "Started {}, finished {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        report.ended_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
