use std::{env, sync::Arc};

use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::{config::Region, Client, Config};
use lambda_http::Body;
use record_ingest_lambda::{bootstrap::ensure_table, AppContext};
use uuid::Uuid;

pub fn body_as_string(body: &Body) -> String {
    match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    }
}

#[allow(dead_code)]
pub struct TestSetup {
    pub ctx: Arc<AppContext>,
    pub client: Client,
    pub table: String,
    _guard: TableGuard,
}

struct TableGuard {
    client: Client,
    table: String,
}

impl TableGuard {
    async fn new(client: Client, table: String) -> Result<Self> {
        ensure_table(&client, &table).await?;
        Ok(Self { client, table })
    }
}

impl Drop for TableGuard {
    fn drop(&mut self) {
        let client = self.client.clone();
        let table = self.table.clone();
        tokio::spawn(async move {
            let _ = client.delete_table().table_name(&table).send().await;
        });
    }
}

pub async fn setup_environment() -> Option<TestSetup> {
    let endpoint =
        env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    env::set_var(
        "AWS_ALLOW_HTTP",
        env::var("AWS_ALLOW_HTTP").unwrap_or_else(|_| "true".into()),
    );
    env::set_var(
        "AWS_SDK_LOAD_CONFIG",
        env::var("AWS_SDK_LOAD_CONFIG").unwrap_or_else(|_| "1".into()),
    );

    let region = Region::new(env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()));
    let config = Config::builder()
        .endpoint_url(endpoint)
        .region(region)
        .credentials_provider(Credentials::for_tests())
        .behavior_version_latest()
        .build();
    let client = Client::from_conf(config);

    if client.list_tables().send().await.is_err() {
        eprintln!("skipping integration test: DynamoDB not reachable");
        return None;
    }

    let table = format!("Records_IntegrationTest_{}", Uuid::new_v4().simple());
    let guard = TableGuard::new(client.clone(), table.clone()).await.ok()?;

    let ctx = Arc::new(AppContext::new(client.clone(), table.clone()));

    Some(TestSetup {
        ctx,
        client,
        table,
        _guard: guard,
    })
}
