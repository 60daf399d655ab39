use quizmaster_backend::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    jobs::scheduler,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_address.parse()?;
    let app_state = AppState::new(pool, config);

    let mut job_scheduler = if app_state.config.enable_jobs {
        let handle = scheduler::start(app_state.jobs.clone()).await?;
        scheduler::spawn_startup_metrics(app_state.jobs.clone(), scheduler::STARTUP_METRICS_DELAY);
        Some(handle)
    } else {
        info!("ENABLE_JOBS is false, scheduled jobs are disabled");
        None
    };

    let app = routes::create_router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await?;

    if let Some(handle) = job_scheduler.as_mut() {
        handle.shutdown().await?;
        info!("job scheduler stopped");
    }

    Ok(())
}
