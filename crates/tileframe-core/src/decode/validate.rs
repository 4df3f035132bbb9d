//! Upload checks that run before any bytes are decoded.

use crate::config::EditorConfig;
use crate::error::ValidationError;

/// Reject uploads with an unaccepted MIME type or over the size limit.
///
/// The type check runs first, so an oversized file of the wrong type reports
/// the type error.
pub fn validate_upload(
    mime: &str,
    byte_len: u64,
    config: &EditorConfig,
) -> Result<(), ValidationError> {
    if !config.accepts(mime) {
        return Err(ValidationError::UnsupportedType {
            mime: mime.to_string(),
            accepted: config.accepted_types.clone(),
        });
    }
    if byte_len > config.max_file_size {
        return Err(ValidationError::FileTooLarge {
            size: byte_len,
            max: config.max_file_size,
        });
    }
    Ok(())
}
