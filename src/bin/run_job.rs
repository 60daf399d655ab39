//! Runs one job immediately against the configured database, then exits.

use clap::Parser;
use quizmaster_backend::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    jobs::{JobContext, JobRegistry},
    services::{mail_transport, notification_service::NotificationService},
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "run-job", about = "Run a QuizMaster background job once")]
struct Cli {
    /// Job to run. Omit to list the jobs that can be run.
    job: Option<String>,
}

fn print_available(registry: &JobRegistry) {
    eprintln!("Usage: run-job <job-name>");
    eprintln!("Available jobs:");
    for def in registry.definitions().iter().filter(|def| def.manual) {
        eprintln!("  {:<20} {}", def.name, def.schedule);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;

    let notifications = NotificationService::new(
        mail_transport::from_config(&config.mail),
        config.mail.from_address.clone(),
        config.frontend_url.clone(),
        config.mail.send_delay,
    );
    let registry = JobRegistry::new(JobContext::new(pool.clone(), notifications));

    let Some(name) = cli.job else {
        print_available(&registry);
        return Ok(ExitCode::FAILURE);
    };

    let code = match registry.trigger(&name).await {
        Ok(outcome) => {
            println!("{}: {} ({})", name, outcome.status(), outcome.details());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} failed: {}", name, e);
            if matches!(e, quizmaster_backend::error::Error::UnknownJob(_)) {
                print_available(&registry);
            }
            ExitCode::FAILURE
        }
    };

    pool.close().await;
    Ok(code)
}
