use tracing_subscriber::EnvFilter;

use coursebook::infrastructure::{AppConfig, AppContainer};
use coursebook::presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coursebook=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "Starting coursebook on port {} (database {}, uploads {})",
        config.port,
        config.database_url,
        config.upload_dir.display()
    );

    let container = AppContainer::new(config)?;
    HttpServer::new(&container).run().await
}
