use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
        TableStatus,
    },
    Client,
};
use tokio::time::{sleep, Duration};

/// Create the records table when it does not exist yet.
///
/// Only used for local development and integration tests; deployed
/// environments provision the table out of band.
pub async fn ensure_table(client: &Client, table: &str) -> Result<(), aws_sdk_dynamodb::Error> {
    if table_exists(client, table).await? {
        return Ok(());
    }

    client
        .create_table()
        .table_name(table)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("id")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("static id definition"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("id")
                .key_type(KeyType::Hash)
                .build()
                .expect("static id key"),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await?;

    wait_for_active(client, table).await
}

async fn table_exists(client: &Client, table: &str) -> Result<bool, aws_sdk_dynamodb::Error> {
    let mut last_evaluated = None;
    loop {
        let mut req = client.list_tables();
        if let Some(ref start) = last_evaluated {
            req = req.exclusive_start_table_name(start);
        }
        let resp = req.send().await?;
        if resp
            .table_names
            .as_ref()
            .unwrap_or(&vec![])
            .iter()
            .any(|name| name == table)
        {
            return Ok(true);
        }
        if let Some(next) = resp.last_evaluated_table_name {
            last_evaluated = Some(next);
        } else {
            break;
        }
    }
    Ok(false)
}

async fn wait_for_active(client: &Client, table: &str) -> Result<(), aws_sdk_dynamodb::Error> {
    for _ in 0..20 {
        let resp = client.describe_table().table_name(table).send().await?;
        if resp
            .table
            .and_then(|t| t.table_status)
            .map_or(false, |status| status == TableStatus::Active)
        {
            return Ok(());
        }
        sleep(Duration::from_millis(200)).await;
    }
    Ok(())
}
