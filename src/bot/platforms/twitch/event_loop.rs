use std::{future::Future, time::Duration};

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::bot::{commands::commands::BotResult, dispatcher::dispatcher::Dispatcher, platforms::twitch::twitch::{map_privmsg, TwitchClient}, state::def::{BotConfig, BotError}};

const MAX_RECONNECT_ATTEMPTS: u32 = 25;

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(2u64.pow(attempt.min(6)) * 1000)
}

async fn reconnect(client: &TwitchClient, config: &BotConfig) -> BotResult<()> {
    let mut client = client.client.lock().await;
    client.reconnect().await?;
    client.join(config.irc_channel()).await?;
    info!("Reconnected to {}", config.irc_channel());
    Ok(())
}

/// Retries `attempt` until it succeeds, waiting `delay(n)` before try `n`.
/// `attempts` carries over between calls and is reset by the caller once a
/// message arrives again.
async fn retry_with_backoff<F, Fut>(attempts: &mut u32, delay: impl Fn(u32) -> Duration, mut attempt: F) -> BotResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BotResult<()>>,
{
    loop {
        *attempts += 1;
        if *attempts > MAX_RECONNECT_ATTEMPTS {
            error!("Giving up after {} reconnect attempts", MAX_RECONNECT_ATTEMPTS);
            return Err(BotError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
        }
        sleep(delay(*attempts)).await;
        match attempt().await {
            Ok(()) => return Ok(()),
            Err(e) => warn!("Reconnect attempt {} failed: {e}", attempts),
        }
    }
}

/// Reads chat one message at a time. Each message is fully dispatched,
/// network calls included, before the next one is read.
pub async fn run_twitch_loop(client: TwitchClient, mut dispatcher: Dispatcher, config: &BotConfig) -> BotResult<()> {
    let mut retry_attempts = 0;

    loop {
        let received = client.client.lock().await.recv().await;
        let irc_msg = match received {
            Ok(msg) => {
                retry_attempts = 0;
                msg
            }
            Err(e) => {
                if !config.reconnect {
                    return Err(BotError::RecvError(e));
                }
                warn!("Connection error: {e}. Reconnecting");
                retry_with_backoff(&mut retry_attempts, backoff, || reconnect(&client, config)).await?;
                continue;
            }
        };

        let typed = match irc_msg.as_typed() {
            Ok(typed) => typed,
            Err(e) => {
                warn!("Skipping unparseable IRC message: {e}");
                continue;
            }
        };

        match typed {
            tmi::Message::Privmsg(msg) => {
                let event = map_privmsg(&msg);
                debug!("[{}] {}: {}", event.channel, event.sender, event.message);
                dispatcher.dispatch_message(&event).await;
            }
            tmi::Message::Reconnect => {
                info!("Server asked for reconnect");
                if let Err(e) = reconnect(&client, config).await {
                    if !config.reconnect {
                        return Err(e);
                    }
                    warn!("Reconnect failed: {e}. Retrying with backoff");
                    retry_with_backoff(&mut retry_attempts, backoff, || reconnect(&client, config)).await?;
                }
            }
            tmi::Message::Ping(ping) => {
                client.client.lock().await.pong(&ping).await?;
            }
            _ => {}
        }
    }
}
