//! Sniff-check that a source looks like a calendar document.
//!
//! This is a gate, not a parser. Only the name suffix and the leading
//! `BEGIN:VCALENDAR` token are checked; the rest of the text is not looked at.

use tracing::debug;

use crate::error::{IcsChunkError, IcsChunkResult};
use crate::source::BinarySource;

/// Required suffix of the source name (case-sensitive).
pub const ICS_EXTENSION: &str = ".ics";

/// Token the trimmed text must start with.
pub const VCALENDAR_BEGIN: &str = "BEGIN:VCALENDAR";

/// Validate `source` and return its full text, unmodified.
///
/// The name is checked before any bytes are read.
pub async fn validate<S: BinarySource>(source: &S) -> IcsChunkResult<String> {
    if !has_ics_extension(source.name()) {
        debug!(name = source.name(), "rejected: missing .ics extension");
        return Err(IcsChunkError::InvalidExtension);
    }

    let text = source.text().await?;

    if !looks_like_calendar(&text) {
        debug!(name = source.name(), "rejected: no leading BEGIN:VCALENDAR");
        return Err(IcsChunkError::InvalidContent);
    }

    Ok(text)
}

pub fn has_ics_extension(name: &str) -> bool {
    name.ends_with(ICS_EXTENSION)
}

pub fn looks_like_calendar(text: &str) -> bool {
    text.trim().starts_with(VCALENDAR_BEGIN)
}
