use thiserror::Error;

/// Startup-time errors (HTTP layer). Per-request failures never reach here —
/// the engine turns those into status codes itself (§4.4, §7).
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CoreError(#[from] shuriken_core::error::CoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
