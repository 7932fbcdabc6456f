//! State of the currently selected file.
//!
//! `Idle → Validating → Ready | Failed`, back to `Validating` on every new
//! selection. A failure always drops the previous chunk list.

use std::ops::Range;

use anyhow::Result;
use icschunk_core::{BinarySource, Chunk, ChunkSize, chunk, validate};
use tracing::{debug, info};

/// Position and size of one chunk. Owns no bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkEntry {
    pub index: usize,
    pub size: u64,
    pub range: Range<u64>,
}

impl<S: BinarySource> From<&Chunk<'_, S>> for ChunkEntry {
    fn from(chunk: &Chunk<'_, S>) -> Self {
        ChunkEntry {
            index: chunk.index,
            size: chunk.size,
            range: chunk.data.range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Validating,
    Ready(Vec<ChunkEntry>),
    Failed(String),
}

pub struct Session<S> {
    selected: Option<S>,
    state: SessionState,
    chunk_size: ChunkSize,
}

impl<S: BinarySource> Session<S> {
    pub fn new(chunk_size: ChunkSize) -> Self {
        Session {
            selected: None,
            state: SessionState::Idle,
            chunk_size,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&S> {
        self.selected.as_ref()
    }

    pub fn is_validating(&self) -> bool {
        matches!(self.state, SessionState::Validating)
    }

    /// Chunk list of a successfully processed file, empty otherwise.
    pub fn chunks(&self) -> &[ChunkEntry] {
        match &self.state {
            SessionState::Ready(chunks) => chunks,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Select a new file. Refused while another file is being validated.
    pub fn select(&mut self, source: S) -> Result<()> {
        if self.is_validating() {
            anyhow::bail!("A file is already being parsed");
        }

        debug!(name = source.name(), "selected file");
        self.selected = Some(source);
        self.state = SessionState::Validating;
        Ok(())
    }

    /// Validate and chunk the selected file.
    pub async fn process(&mut self) -> &SessionState {
        let Some(source) = self.selected.as_ref() else {
            self.state = SessionState::Idle;
            return &self.state;
        };

        self.state = match validate(source).await {
            Ok(_) => {
                let entries: Vec<ChunkEntry> = chunk(source, self.chunk_size)
                    .iter()
                    .map(ChunkEntry::from)
                    .collect();
                info!(name = source.name(), chunks = entries.len(), "file ready");
                SessionState::Ready(entries)
            }
            Err(e) => {
                info!(name = source.name(), error = %e, "file rejected");
                SessionState::Failed(e.to_string())
            }
        };

        &self.state
    }

    /// Select and process in one step.
    pub async fn load(&mut self, source: S) -> Result<&SessionState> {
        self.select(source)?;
        Ok(self.process().await)
    }

    /// A lazily readable chunk of the selected file.
    pub fn chunk(&self, index: usize) -> Option<Chunk<'_, S>> {
        let source = self.selected.as_ref()?;
        let entry = self.chunks().get(index)?;
        let data = source.slice(entry.range.clone()).ok()?;

        Some(Chunk {
            index: entry.index,
            size: entry.size,
            data,
        })
    }
}
