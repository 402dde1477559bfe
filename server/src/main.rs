use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use dashboard_core::TodoListService;
use dashboard_server::config::Config;
use dashboard_server::seed::seed_demo_items;
use dashboard_server::{logging, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::init_tracing();

    let repo = config.open_repository()?;
    let mut service = TodoListService::new(repo);
    if config.seed {
        let inserted = seed_demo_items(&mut service)?;
        info!(inserted, "demo items seeded");
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, memory = config.memory, db = %config.db_path.display(), "listening");

    dashboard_server::run_with_shutdown(listener, AppState::from_service(service), async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
        }
    })
    .await?;
    info!("shut down");
    Ok(())
}
