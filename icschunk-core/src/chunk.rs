//! Fixed-size byte partitioning of a source.
//!
//! Chunking only computes boundaries. Each [`Chunk`] carries a
//! [`SourceSlice`] that reads its bytes when the caller asks for them.

use std::num::NonZeroU64;
use std::ops::Range;

use tracing::debug;

use crate::error::{IcsChunkError, IcsChunkResult};
use crate::source::{BinarySource, SourceSlice};

/// 1 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// A chunk size in bytes. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkSize(NonZeroU64);

impl ChunkSize {
    pub fn new(bytes: u64) -> IcsChunkResult<Self> {
        NonZeroU64::new(bytes)
            .map(ChunkSize)
            .ok_or(IcsChunkError::InvalidChunkSize(bytes))
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        const DEFAULT: NonZeroU64 = match NonZeroU64::new(DEFAULT_CHUNK_SIZE) {
            Some(n) => n,
            None => panic!("default chunk size is zero"),
        };
        ChunkSize(DEFAULT)
    }
}

impl TryFrom<u64> for ChunkSize {
    type Error = IcsChunkError;

    fn try_from(bytes: u64) -> IcsChunkResult<Self> {
        ChunkSize::new(bytes)
    }
}

/// One contiguous piece of a source.
#[derive(Debug, Clone)]
pub struct Chunk<'a, S> {
    /// Position in the sequence, starting at 0.
    pub index: usize,
    /// Length in bytes, in `1..=chunk_size`.
    pub size: u64,
    pub data: SourceSlice<'a, S>,
}

/// Split `source` into chunks of `chunk_size` bytes; the last one may be shorter.
///
/// An empty source yields no chunks.
pub fn chunk<S: BinarySource>(source: &S, chunk_size: ChunkSize) -> Vec<Chunk<'_, S>> {
    let chunks: Vec<_> = chunk_ranges(source.len(), chunk_size)
        .enumerate()
        .map(|(index, range)| Chunk {
            index,
            size: range.end - range.start,
            data: SourceSlice::new(source, range),
        })
        .collect();

    debug!(
        name = source.name(),
        len = source.len(),
        chunk_size = chunk_size.get(),
        count = chunks.len(),
        "chunked source"
    );

    chunks
}

/// Byte ranges covering `0..len` in steps of `chunk_size`.
pub fn chunk_ranges(len: u64, chunk_size: ChunkSize) -> ChunkRanges {
    ChunkRanges {
        offset: 0,
        len,
        step: chunk_size.get(),
    }
}

/// Iterator returned by [`chunk_ranges`].
#[derive(Debug, Clone)]
pub struct ChunkRanges {
    offset: u64,
    len: u64,
    step: u64,
}

impl Iterator for ChunkRanges {
    type Item = Range<u64>;

    fn next(&mut self) -> Option<Range<u64>> {
        if self.offset >= self.len {
            return None;
        }
        let end = self.offset.saturating_add(self.step).min(self.len);
        let range = self.offset..end;
        self.offset = end;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.offset).div_ceil(self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkRanges {}
