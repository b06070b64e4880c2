//! Convenience result type alias for the waiting room.

use crate::error::AppError;

/// A specialized `Result` type for waiting-room operations.
pub type AppResult<T> = Result<T, AppError>;
