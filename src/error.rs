use thiserror::Error;

/// Internal application errors surfaced during request handling.
///
/// None of these reach the caller: the handler maps every variant to the
/// fixed 500 response and keeps the detail in the log stream.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("dynamodb error: {0}")]
    Dynamo(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short classification string used for logging.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Dynamo(_) => "dynamodb",
            AppError::Config(_) => "config",
        }
    }
}
