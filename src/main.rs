use clap::Parser;
use live_avatar_demo::config::Config;
use live_avatar_demo::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("live_avatar_demo=info")),
        )
        .init();

    let config = Config::parse();
    server::run(config).await
}
