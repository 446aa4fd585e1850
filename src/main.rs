use tracing_subscriber::EnvFilter;

use waymark::config::Config;
use waymark::engine::Engine;
use waymark::error::Error;
use waymark::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let engine = Engine::open(&config).await?;

    serve(engine, config.bind_addr).await
}
