use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::time::MissedTickBehavior;

use baristamatic_dispenser::{Catalog, DispenserConfig, DispenserStore};
use baristamatic_kiosk::{render, respond, status_cleared};
use baristamatic_observability::LogFormat;

/// How often the idle kiosk checks for a status clear.
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

async fn draw(stdout: &mut Stdout, store: &DispenserStore, message: Option<&str>) -> std::io::Result<()> {
    if let Some(message) = message {
        stdout.write_all(format!("{message}\n").as_bytes()).await?;
    }
    stdout.write_all(render(store).as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    baristamatic_observability::init(LogFormat::from_env()?);

    let config = DispenserConfig::from_env()?;
    let store = DispenserStore::new(Catalog::seed(), &config)?;
    let subscription = store.subscribe();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(REFRESH_INTERVAL);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    draw(&mut stdout, &store, None).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let reply = respond(&store, &line);
                if reply.quit {
                    break;
                }
                // The redraw below reflects everything queued so far.
                subscription.drain();
                draw(&mut stdout, &store, reply.message.as_deref()).await?;
            }
            _ = refresh.tick() => {
                if status_cleared(subscription.drain()) {
                    draw(&mut stdout, &store, None).await?;
                }
            }
        }
    }

    tracing::info!("Shutting down dispenser {}", store.machine_id());
    Ok(())
}
