mod app_error;

pub use app_error::AppError;

/// Result type shared by handlers, services and storage adapters.
pub type Result<T> = std::result::Result<T, AppError>;
