//! API handlers module

pub mod citations;
pub mod discover;
pub mod health;
pub mod insights;
pub mod papers;

use litexplorer_common::errors::AppError;
use validator::Validate;

/// Run derive-based validation, mapping failures to a 400
pub(crate) fn validate<T: Validate>(request: &T) -> Result<(), AppError> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: e.field_errors().keys().next().map(|f| f.to_string()),
    })
}
