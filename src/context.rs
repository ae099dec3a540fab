//! Application-scoped context shared across invocations.

use aws_sdk_dynamodb::Client;

/// Holds the shared DynamoDB client and the target table name.
///
/// Constructed once at startup and handed to every invocation; the client is
/// connection plumbing only, so concurrent reuse is safe.
#[derive(Clone)]
pub struct AppContext {
    client: Client,
    table_name: String,
}

impl AppContext {
    /// Construct a new context for the given DynamoDB client and target table.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Borrow the underlying DynamoDB client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Name of the DynamoDB table records are written to.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}
