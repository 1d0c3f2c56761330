// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CareerTracker API Server
//!
//! Tracks job applications, interviews and documents for users who log in
//! with an emailed one-time code.

use career_tracker::{config::Config, db::Db, services::mailer, AppState};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "career-tracker")]
#[command(about = "Job application tracker backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Send reminders for interviews in the next 24 hours, then exit
    SendReminders,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");

    let db = Db::connect(&config)
        .await
        .expect("Failed to connect to storage");

    let mailer = mailer::from_config(&config).expect("Failed to configure mail delivery");

    let state = Arc::new(AppState::new(config.clone(), db, mailer).expect("Failed to initialize services"));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!(port = config.port, "Starting CareerTracker API");

            // Build router
            let app = career_tracker::routes::create_router(state);

            // Start server
            let addr = format!("0.0.0.0:{}", config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(address = %addr, "Server listening");

            axum::serve(listener, app).await?;
        }
        Commands::SendReminders => {
            let report = state.reminders.run(chrono::Utc::now()).await?;
            tracing::info!(
                candidates = report.candidates,
                sent = report.sent,
                failed = report.failed,
                "Successfully sent {} reminders",
                report.sent
            );
        }
    }

    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("career_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
