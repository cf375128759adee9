use dioxus_logger::tracing::{self, Level};
use skirmish::server::{
    config::Config, error::Error, scheduler::Scheduler,
    service::{battle::BattleService, retry::RetryContext},
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;

    // Catch up on killmails ingested while the service was down
    let clustering = config.clustering;
    let db_ref = &db;
    let initial = RetryContext::new()
        .execute_with_retry("initial battle clustering pass", move || async move {
            BattleService::new(db_ref, clustering)
                .run_clustering_pass()
                .await
        })
        .await;
    if let Err(e) = initial {
        tracing::error!("Initial battle clustering pass failed: {:?}", e);
    }

    let mut scheduler = Scheduler::new(db, config.clustering).await?;
    scheduler.start(&config.cluster_cron).await?;

    tracing::info!("Battle clustering scheduled with cron {}", config.cluster_cron);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
    scheduler.shutdown().await
}
