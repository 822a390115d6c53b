use std::{process::ExitCode, sync::Arc};

use ppbot::{api::{oauth::fetch_access_token, twitch_api::{resolve_session, HelixClient}}, bot::{commands::{commands::{build_command_specs, BotResult}, CommandSpec}, dispatcher::dispatcher::Dispatcher, platforms::twitch::{event_loop::run_twitch_loop, twitch::TwitchClient}, state::def::{AppState, BotConfig}}};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match BotConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    if let Err(e) = run_chat_bot(config).await {
        error!("Chat bot stopped: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run_chat_bot(config: Arc<BotConfig>) -> BotResult<()> {
    let http = reqwest::Client::new();

    let token = fetch_access_token(&http, &config).await?;
    let api = Arc::new(HelixClient::new(http, &config.helix_url, &config.client_id));
    let session = resolve_session(api.as_ref(), &config.channel, &config.operator, &token.access_token).await?;

    let chat = TwitchClient::connect(&config, &session.access_token).await?;
    let state = Arc::new(AppState::new(session, config.clone(), Arc::new(chat.clone()), api));

    let specs: Vec<CommandSpec> = build_command_specs(&config);
    for spec in &specs {
        info!("Registered {} ({}): {}", spec.trigger, spec.command.usage(), spec.command.description());
    }

    run_twitch_loop(chat, Dispatcher::new(specs, state), &config).await
}
