use anyhow::Context;
use log::{info, warn};
use restock_watch::scrapers::HttpScraper;
use restock_watch::{
    run_forever, BotConfig, CatalogFetcher, ChangeNotifier, DiscordSink, SeenSet,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let config = BotConfig::from_env().context("failed to load configuration")?;
    info!("Loaded configuration: {:?}", config);

    let scraper = HttpScraper::with_settings(&config.user_agent, config.request_timeout)?
        .with_headers(vec![("accept-language", "en-AU,en;q=0.9")])?;
    let fetcher = CatalogFetcher::from_config(Box::new(scraper), &config)?;

    let sink = DiscordSink::new(&config.discord_token, config.request_timeout)?;
    let user = sink
        .login()
        .await
        .context("could not log in to Discord, check DISCORD_TOKEN")?;
    info!("Logged in as {} ({})", user.username, user.id);

    let mut notifier = ChangeNotifier::new(
        fetcher,
        Box::new(sink),
        Box::new(SeenSet::new()),
        config.channel_id,
    );

    tokio::select! {
        _ = run_forever(config.check_interval, &mut notifier) => {}
        _ = shutdown_signal() => info!("Shutting down"),
    }

    notifier.stats().log_summary();
    match notifier.stats().to_json() {
        Ok(json) => info!("Final stats:\n{}", json),
        Err(e) => warn!("Could not serialize stats: {}", e),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
