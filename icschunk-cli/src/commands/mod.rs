pub mod config;
pub mod download;
pub mod inspect;
pub mod split;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icschunk_core::config::IcsChunkConfig;
use icschunk_core::{BinarySource, ChunkSize, FileSource, part_filename};

use crate::session::Session;
use crate::utils::tui::create_spinner;

/// Chunk size and output directory after applying CLI overrides to the config.
pub struct Settings {
    pub chunk_size: ChunkSize,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn resolve(chunk_size: Option<u64>, output_dir: Option<PathBuf>) -> Result<Self> {
        let config = IcsChunkConfig::load()?;
        Self::from_config(&config, chunk_size, output_dir)
    }

    fn from_config(
        config: &IcsChunkConfig,
        chunk_size: Option<u64>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let chunk_size = match chunk_size {
            Some(bytes) => ChunkSize::new(bytes)?,
            None => config.chunk_size()?,
        };

        Ok(Settings {
            chunk_size,
            output_dir: output_dir.unwrap_or_else(|| config.output_path()),
        })
    }
}

/// Open `path` and run it through a fresh session.
///
/// Returns the session only if the file was accepted; otherwise the
/// validation message becomes the error.
pub async fn load_session(path: &Path, chunk_size: ChunkSize) -> Result<Session<FileSource>> {
    let source = FileSource::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut session = Session::new(chunk_size);

    let spinner = create_spinner("Parsing and chunking...");
    let loaded = session.load(source).await.map(|_| ());
    spinner.finish_and_clear();
    loaded?;

    if let Some(message) = session.error() {
        anyhow::bail!("{}", message);
    }

    Ok(session)
}

/// Write the chunk at `index` into `dir`, returning the written path.
pub async fn save_chunk(session: &Session<FileSource>, index: usize, dir: &Path) -> Result<PathBuf> {
    let chunk = session
        .chunk(index)
        .with_context(|| format!("Part {} does not exist", index + 1))?;
    let name = part_filename(chunk.data.source().name(), chunk.index);
    let path = dir.join(name);

    let bytes = chunk.data.read().await?;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved chunk");
    Ok(path)
}
