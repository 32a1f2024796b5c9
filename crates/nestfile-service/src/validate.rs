//! Input validation shared by folder and file operations.

use nestfile_core::error::AppError;
use nestfile_core::result::AppResult;

/// Maximum display-name length, matching the column width.
pub const MAX_NAME_LEN: usize = 255;

/// Validate a folder or file display name.
pub fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
