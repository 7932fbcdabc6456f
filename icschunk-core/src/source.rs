//! Binary sources the validator and chunker read from.
//!
//! A source is an immutable run of bytes with a name and a known length.
//! Bytes are only read when someone asks for them: chunking works purely on
//! offsets and hands out [`SourceSlice`] views that materialize lazily.

use std::fmt;
use std::future::Future;
use std::io::SeekFrom;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::{IcsChunkError, IcsChunkResult};

/// A named, immutable sequence of bytes.
pub trait BinarySource: Sized {
    /// The label the source was picked under (usually a file name).
    fn name(&self) -> &str;

    /// Total length in bytes.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the bytes in `range`. Only that range is read.
    fn read_range(
        &self,
        range: Range<u64>,
    ) -> impl Future<Output = IcsChunkResult<Vec<u8>>> + Send;

    /// Read the whole source as text. Invalid UTF-8 is replaced, not rejected,
    /// and one leading byte-order mark is dropped.
    fn text(&self) -> impl Future<Output = IcsChunkResult<String>> + Send;

    /// A view over `range` that reads nothing until asked.
    fn slice(&self, range: Range<u64>) -> IcsChunkResult<SourceSlice<'_, Self>> {
        check_range(&range, self.len())?;
        Ok(SourceSlice::new(self, range))
    }
}

const UTF8_BOM: &str = "\u{feff}";

/// Lossy UTF-8 decode without a leading byte-order mark.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

fn check_range(range: &Range<u64>, len: u64) -> IcsChunkResult<()> {
    if range.start > range.end || range.end > len {
        return Err(IcsChunkError::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

/// A borrowed byte range of a [`BinarySource`].
pub struct SourceSlice<'a, S> {
    source: &'a S,
    range: Range<u64>,
}

impl<'a, S: BinarySource> SourceSlice<'a, S> {
    /// Caller guarantees `range` lies within the source.
    pub(crate) fn new(source: &'a S, range: Range<u64>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= source.len());
        SourceSlice { source, range }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn range(&self) -> Range<u64> {
        self.range.clone()
    }

    pub fn len(&self) -> u64 {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the bytes of this slice.
    pub async fn read(&self) -> IcsChunkResult<Vec<u8>> {
        self.source.read_range(self.range()).await
    }
}

impl<S> Clone for SourceSlice<'_, S> {
    fn clone(&self) -> Self {
        SourceSlice {
            source: self.source,
            range: self.range.clone(),
        }
    }
}

impl<S> fmt::Debug for SourceSlice<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSlice")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// File-backed source
// =============================================================================

/// A source backed by a file on disk.
///
/// The length is captured when the file is opened. Every read reopens the
/// file, so nothing is held open between calls.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    len: u64,
}

impl FileSource {
    pub async fn open(path: impl AsRef<Path>) -> IcsChunkResult<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileSource {
            path,
            name,
            len: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BinarySource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    async fn read_range(&self, range: Range<u64>) -> IcsChunkResult<Vec<u8>> {
        check_range(&range, self.len)?;

        let mut file = tokio::fs::File::open(&self.path).await?;
        file.seek(SeekFrom::Start(range.start)).await?;

        let mut buf = vec![0u8; (range.end - range.start) as usize];
        file.read_exact(&mut buf).await?;
        Ok(buf)
    }

    async fn text(&self) -> IcsChunkResult<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(decode_text(&bytes))
    }
}

// =============================================================================
// In-memory source
// =============================================================================

/// A source over bytes already held in memory. Cloning shares the bytes.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            name: name.into(),
            bytes: bytes.into().into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl BinarySource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_range(&self, range: Range<u64>) -> IcsChunkResult<Vec<u8>> {
        check_range(&range, self.len())?;
        Ok(self.bytes[range.start as usize..range.end as usize].to_vec())
    }

    async fn text(&self) -> IcsChunkResult<String> {
        Ok(decode_text(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn memory_source_reads_only_requested_range() {
        let source = MemorySource::new("test.ics", "BEGIN:VCALENDAR");
        let bytes = source.read_range(6..15).await.unwrap();
        assert_eq!(bytes, b"VCALENDAR");
    }

    #[tokio::test]
    async fn out_of_bounds_range_is_rejected() {
        let source = MemorySource::new("test.ics", "abc");
        let err = source.read_range(1..4).await.unwrap_err();
        assert!(matches!(
            err,
            IcsChunkError::RangeOutOfBounds { start: 1, end: 4, len: 3 }
        ));
        assert!(source.slice(2..1).is_err());
    }

    #[tokio::test]
    async fn slice_materializes_lazily() {
        let source = MemorySource::new("test.ics", "0123456789");
        let slice = source.slice(3..7).unwrap();
        assert_eq!(slice.len(), 4);
        assert_eq!(slice.range(), 3..7);
        assert_eq!(slice.read().await.unwrap(), b"3456");
    }

    #[tokio::test]
    async fn memory_source_text_replaces_invalid_utf8() {
        let source = MemorySource::new("test.ics", vec![b'a', 0xff, b'b']);
        assert_eq!(source.text().await.unwrap(), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn file_source_reports_name_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holidays.ics");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"BEGIN:VCALENDAR\nEND:VCALENDAR").unwrap();

        let source = FileSource::open(&path).await.unwrap();
        assert_eq!(source.name(), "holidays.ics");
        assert_eq!(source.len(), 29);
        assert_eq!(source.read_range(16..29).await.unwrap(), b"END:VCALENDAR");
        assert_eq!(
            source.text().await.unwrap(),
            "BEGIN:VCALENDAR\nEND:VCALENDAR"
        );
    }

    #[tokio::test]
    async fn file_source_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::open(dir.path().join("missing.ics"))
            .await
            .unwrap_err();
        assert!(matches!(err, IcsChunkError::Io(_)));
    }

    #[tokio::test]
    async fn text_drops_leading_byte_order_mark() {
        let source = MemorySource::new("outlook.ics", "\u{feff}BEGIN:VCALENDAR\r\n");
        assert_eq!(source.text().await.unwrap(), "BEGIN:VCALENDAR\r\n");

        // Only the first mark is part of the encoding.
        let source = MemorySource::new("twice.ics", "\u{feff}\u{feff}X");
        assert_eq!(source.text().await.unwrap(), "\u{feff}X");
    }

    #[tokio::test]
    async fn file_source_text_drops_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outlook.ics");
        std::fs::write(&path, b"\xEF\xBB\xBFBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

        let source = FileSource::open(&path).await.unwrap();
        assert_eq!(source.len(), 35);
        assert_eq!(
            source.text().await.unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );
        // Byte ranges still cover the mark.
        assert_eq!(source.read_range(0..3).await.unwrap(), b"\xEF\xBB\xBF");
    }
}
