//! csvmeta-ingest - CSV upload metadata handler
//!
//! With no subcommand the binary runs as a Lambda function. `invoke` runs a
//! single notification payload from a file against the configured endpoints.

use anyhow::Context;
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use csvmeta_common::logging::{init_logging, LogConfig, LogLevel};
use csvmeta_ingest::{
    config::IngestConfig, persistence::DynamoMetadataStore, processor::IngestProcessor,
    response::InvocationResult, storage::S3ObjectStore,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Quiet SDK internals unless LOG_FILTER says otherwise
const DEFAULT_FILTER: &str = "aws_smithy_runtime=warn,aws_config=warn,hyper=warn";

#[derive(Parser, Debug)]
#[command(name = "csvmeta-ingest")]
#[command(author, version, about = "Record structural metadata of uploaded CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve invocations from the Lambda runtime API (default)
    Serve,

    /// Process one S3 notification payload read from a JSON file
    Invoke {
        /// Path to the event JSON
        #[arg(short, long)]
        event: PathBuf,
    },
}

async fn build_processor(config: &IngestConfig) -> IngestProcessor {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

    IngestProcessor::new(
        Arc::new(S3ObjectStore::from_sdk_config(&sdk_config, &config.storage)),
        Arc::new(DynamoMetadataStore::from_sdk_config(
            &sdk_config,
            &config.persistence,
        )),
        config.processor_config(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence
    let log_config = LogConfig::builder()
        .level(log_level)
        .filter_directives(DEFAULT_FILTER)
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    let config = IngestConfig::from_env()?;
    let processor = Arc::new(build_processor(&config).await);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!(
                bucket = %config.storage.bucket,
                table = %config.persistence.table,
                "Starting Lambda runtime"
            );

            let func = service_fn(move |event: LambdaEvent<serde_json::Value>| {
                let processor = processor.clone();

                async move { Ok::<InvocationResult, Error>(processor.handle(event.payload).await) }
            });

            run(func).await
        },
        Command::Invoke { event } => {
            let raw = tokio::fs::read_to_string(&event)
                .await
                .with_context(|| format!("Failed to read event file {}", event.display()))?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("Event file is not valid JSON")?;

            let result = processor.handle(payload).await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.is_success() {
                std::process::exit(1);
            }

            Ok(())
        },
    }
}
