use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{error, info};

use phase10_app::{ScoreKeeper, config::Config};
use phase10_core::TracingEventHandler;
use phase10_persistence::{SnapshotRepository, connection::connect_and_migrate};

#[tokio::main]
async fn main() {
    // stdout carries responses, so logs go to stderr
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting Phase 10 score keeper...");

    let config = Config::new();
    if let Err(e) = run(config).await {
        error!("Score keeper failed: {:#}", e);
        std::process::exit(1);
    }

    info!("Score keeper shutdown complete.");
}

async fn run(config: Config) -> anyhow::Result<()> {
    let db = connect_and_migrate(&config.database_url).await?;
    let repository = SnapshotRepository::new(db);

    let mut keeper = ScoreKeeper::restore(
        repository,
        config.storage_key.clone(),
        config.discard_corrupt_snapshot,
    )
    .await?;
    keeper.add_event_handler(Box::new(TracingEventHandler));

    info!("Reading actions from stdin, one JSON document per line");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let response = keeper.handle_line(&line).await;
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                stdout.write_all(encoded.as_bytes()).await?;
                stdout.flush().await?;
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    Ok(())
}
