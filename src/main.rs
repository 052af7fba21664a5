//! Themis - command line entry point
//!
//! Validates one JSON record against a named request and prints the outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use themis::{
    config::Config,
    constants::roles,
    models::{Principal, ValidationContext, record_from_value},
    services::ValidationService,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "themis", about = "Validate a JSON record against a named request")]
struct Cli {
    /// Request name (e.g. users.store)
    request: String,
    /// Path to a JSON object holding the submitted fields
    record: PathBuf,
    /// Id of the record being updated, ignored by unique checks
    #[arg(long)]
    exclude_id: Option<i64>,
    /// Role of the submitting principal (repeatable)
    #[arg(long = "role", default_value = roles::SUPERVISOR)]
    roles: Vec<String>,
    /// Id of the submitting principal
    #[arg(long, default_value_t = 0)]
    principal_id: i64,
    /// Locale for generic messages
    #[arg(long)]
    locale: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let raw = std::fs::read_to_string(&cli.record)
        .with_context(|| format!("cannot read {}", cli.record.display()))?;
    let record = record_from_value(serde_json::from_str(&raw)?)
        .context("the record must be a JSON object")?;

    let mut context = match cli.exclude_id {
        Some(id) => ValidationContext::for_update(id),
        None => ValidationContext::new(),
    };
    if let Some(locale) = cli.locale {
        context = context.with_locale(locale);
    }

    let state = AppState::bootstrap(&config).await?;
    let principal = Principal::new(cli.principal_id, cli.roles);

    let outcome =
        ValidationService::check(&state, &cli.request, &principal, &record, &context).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(if outcome.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
