use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use game_server::config::Config;
use game_server::registry::SessionRegistry;
use game_server::{create_routes, load_card_deck};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting word-party server...");

    let config = Config::new();

    let deck = match load_card_deck(config.cards_path.as_deref()) {
        Ok(deck) => {
            info!("Loaded {} prompt cards", deck.len());
            deck
        }
        Err(e) => {
            error!("Failed to load prompt card deck: {e:#}");
            error!("Set CARDS_PATH to a base64-encoded card list, or unset it to use the built-in deck.");
            std::process::exit(1);
        }
    };

    let registry = Arc::new(SessionRegistry::new(deck));
    let routes = create_routes(registry);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
