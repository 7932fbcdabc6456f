//! Error types for icschunk.

use thiserror::Error;

/// Errors that can occur while validating or chunking a calendar file.
#[derive(Error, Debug)]
pub enum IcsChunkError {
    #[error("File is not an .ics file")]
    InvalidExtension,

    #[error("File does not appear to be a valid ICS calendar")]
    InvalidContent,

    #[error("Chunk size must be greater than zero (got {0})")]
    InvalidChunkSize(u64),

    #[error("Byte range {start}..{end} is outside the source (length {len})")]
    RangeOutOfBounds { start: u64, end: u64, len: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for icschunk operations.
pub type IcsChunkResult<T> = Result<T, IcsChunkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_exact() {
        assert_eq!(
            IcsChunkError::InvalidExtension.to_string(),
            "File is not an .ics file"
        );
        assert_eq!(
            IcsChunkError::InvalidContent.to_string(),
            "File does not appear to be a valid ICS calendar"
        );
    }
}
