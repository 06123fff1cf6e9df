use anyhow::Context;
use tracing::{info, warn, Level};

use petagency::catalog::GENIE_GLYPH;
use petagency::rng::Rng64;
use petagency::Agency;
use spacebots::{RestClient, SpaceApi, Subscription};

fn usage_and_exit() -> ! {
    eprintln!(
        "pet_agencyd\n\n\
USAGE:\n  pet_agencyd [--reset]\n\n\
FLAGS:\n  --reset  delete stray unowned bots before starting\n\n\
ENV:\n\
  SPACE_API_URL     default https://recurse.rctogether.com/api\n\
  SPACE_WS_URL      default wss://recurse.rctogether.com/cable\n\
  SPACE_APP_ID      required\n\
  SPACE_APP_SECRET  required\n\
  AGENCY_SEED       optional u64 for reproducible randomness\n"
    );
    std::process::exit(2);
}

#[derive(Clone, Debug)]
struct Config {
    api_url: String,
    ws_url: String,
    app_id: String,
    app_secret: String,
    seed: Option<u64>,
    reset: bool,
}

fn parse_args() -> Config {
    let api_url = std::env::var("SPACE_API_URL")
        .unwrap_or_else(|_| "https://recurse.rctogether.com/api".to_string());
    let ws_url = std::env::var("SPACE_WS_URL")
        .unwrap_or_else(|_| "wss://recurse.rctogether.com/cable".to_string());
    let app_id = std::env::var("SPACE_APP_ID").unwrap_or_else(|_| usage_and_exit());
    let app_secret = std::env::var("SPACE_APP_SECRET").unwrap_or_else(|_| usage_and_exit());
    let seed: Option<u64> = std::env::var("AGENCY_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    let mut reset = false;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--reset" => reset = true,
            "-h" | "--help" => usage_and_exit(),
            _ => usage_and_exit(),
        }
    }

    Config {
        api_url,
        ws_url,
        app_id,
        app_secret,
        seed,
        reset,
    }
}

/// Delete every bot that is not the genie and has never spoken: leftover
/// inventory from a previous run that nobody adopted.
async fn reset_agency(api: &RestClient) -> anyhow::Result<()> {
    let mut deleted = 0usize;
    for bot in api.list_bots().await.context("list bots for reset")? {
        if bot.emoji == GENIE_GLYPH || bot.message.is_some() {
            continue;
        }
        api.delete_bot(bot.id)
            .await
            .with_context(|| format!("delete stray bot {}", bot.id))?;
        deleted += 1;
    }
    info!(deleted, "stray bots removed");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pet_agencyd=info".into()),
        )
        .with_max_level(Level::INFO)
        .init();

    let cfg = parse_args();
    info!(
        api_url = %cfg.api_url,
        ws_url = %cfg.ws_url,
        reset = cfg.reset,
        seeded = cfg.seed.is_some(),
        "pet_agencyd starting"
    );

    let client = RestClient::new(&cfg.api_url, &cfg.app_id, &cfg.app_secret);

    if cfg.reset {
        reset_agency(&client).await?;
    }

    let rng = match cfg.seed {
        Some(seed) => Rng64::from_seed(seed),
        None => Rng64::from_entropy(),
    };
    let mut agency = Agency::create(client, rng)
        .await
        .context("bootstrap agency")?;

    let mut feed = Subscription::connect(&cfg.ws_url, &cfg.app_id, &cfg.app_secret)
        .await
        .context("subscribe to event feed")?;

    // One event at a time; failures propagate and end the run (restart is
    // an operator concern, not ours).
    while let Some(entity) = feed.next_entity().await? {
        agency.handle_entity(&entity).await?;
    }

    warn!("event feed closed; exiting");
    Ok(())
}
