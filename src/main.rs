use tracing::{error, info};

use newsms::{Config, NewsRelay, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = newsms::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        newsms::logging::init_console_only(&config.logging.level);
    }

    // Apply environment overrides
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("newsms - RSS headlines over SMS");
    info!(
        feeds = config.feeds.urls.len(),
        max_headlines = config.feeds.max_headlines,
        "Feeds configured"
    );

    let relay = match NewsRelay::from_config(&config) {
        Ok(relay) => relay,
        Err(e) => {
            error!("Failed to build relay: {}", e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config.server, relay) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
