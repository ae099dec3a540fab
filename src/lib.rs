pub mod runtime_env;

pub mod bootstrap;
mod context;
mod error;
mod handlers;
mod record;

pub use context::AppContext;
pub use error::AppError;
pub use handlers::handle_request;
pub use record::Record;
