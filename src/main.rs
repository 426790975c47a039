use keyward::server::{
    config::Config,
    error::Error,
    router,
    scheduler::Scheduler,
    startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = startup::build_app_state(&config, db)?;

    Scheduler::new(state.clone(), config.sweep_concurrency)
        .await?
        .start()
        .await?;

    let listener = startup::bind_listener(config.listen_addr).await?;

    tracing::info!("Starting server on {}", config.listen_addr);

    let app = router::routes().with_state(state);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }

    Ok(())
}
