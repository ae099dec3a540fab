//! Lambda entrypoint.
//!
//! The binary initialises logging, discovers which environment it is running
//! in, reads the target table name, and then hands execution to
//! `lambda_http`. Each invocation reuses the `AppContext` so the DynamoDB
//! client is cached across requests.

use std::sync::Arc;

use aws_sdk_dynamodb::Client;
use lambda_http::{run, service_fn, Error as LambdaError};
use record_ingest_lambda::{
    bootstrap::ensure_table, handle_request, runtime_env::DeploymentEnv, AppContext, AppError,
};
use tracing::info;

const TABLE_NAME_ENV: &str = "TABLE_NAME";

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .json()
        .with_current_span(false)
        .init();

    let environment = DeploymentEnv::detect();
    let table_name = std::env::var(TABLE_NAME_ENV).map_err(|_| {
        LambdaError::from(
            AppError::Config(format!("missing required env var `{TABLE_NAME_ENV}`")).to_string(),
        )
    })?;
    info!(
        environment = environment.name(),
        %table_name,
        resolution = %environment.source(),
        "initialising Lambda runtime"
    );

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = Client::new(&config);

    let bootstrap_table = std::env::var("BOOTSTRAP_DYNAMODB_TABLES")
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or_else(|_| environment.is_local());

    if bootstrap_table {
        ensure_table(&client, &table_name)
            .await
            .map_err(|e| LambdaError::from(format!("failed to ensure DynamoDB table: {e}")))?;
    } else {
        info!(
            environment = environment.name(),
            "skipping DynamoDB table bootstrap"
        );
    }

    let ctx = Arc::new(AppContext::new(client, table_name));

    run(service_fn(move |event| {
        let ctx = ctx.clone();
        async move { handle_request(ctx, event).await }
    }))
    .await
}
