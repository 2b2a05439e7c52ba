//! Convenience result type alias for BlockIdle.

use crate::error::AppError;

/// A specialized `Result` type for BlockIdle operations.
pub type AppResult<T> = Result<T, AppError>;
