//! Core of the icschunk tool.
//!
//! Two independent operations make up the core:
//! - [`validate()`] checks that a source is named `*.ics` and starts with
//!   `BEGIN:VCALENDAR`, returning its text
//! - [`chunk()`] partitions a source into fixed-size byte ranges without
//!   reading any bytes
//!
//! Both work over any [`BinarySource`]. Neither keeps state between calls.

pub mod chunk;
pub mod config;
pub mod error;
pub mod part;
pub mod source;
pub mod validate;

pub use chunk::{Chunk, ChunkSize, DEFAULT_CHUNK_SIZE, chunk, chunk_ranges};
pub use error::{IcsChunkError, IcsChunkResult};
pub use part::part_filename;
pub use source::{BinarySource, FileSource, MemorySource, SourceSlice};
pub use validate::validate;
