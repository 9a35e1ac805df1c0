use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{config::load_settings, EmailGenerator, HttpEmailGenerator};
use shared::{
    domain::{validate_context, EmailType},
    protocol::GenerateRequest,
};
use tracing_subscriber::EnvFilter;

/// Generate a single email without opening the desktop window.
#[derive(Parser, Debug)]
#[command(name = "emailme-cli")]
struct Args {
    /// Email type label or slug, e.g. "Apology Email" or apology-email.
    #[arg(long, default_value_t = EmailType::ColdEmail)]
    email_type: EmailType,
    #[arg(long)]
    context: String,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();
    validate_context(&args.context)?;

    let mut settings = load_settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(secs) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    let generator = HttpEmailGenerator::from_settings(&settings)
        .context("failed to configure generation client")?;

    let request = GenerateRequest::new(args.email_type, &args.context);
    match generator.generate(&request).await {
        Ok(email) => {
            println!("{email}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(kind = ?err.kind(), error = %err, "email generation failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
