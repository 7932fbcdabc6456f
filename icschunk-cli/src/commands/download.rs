use std::path::Path;

use anyhow::Result;
use icschunk_core::ChunkSize;
use owo_colors::OwoColorize;

use super::{load_session, save_chunk};

/// Save part `part` (1-based) of `path` into `out`. Only that part's bytes are read.
pub async fn run(path: &Path, part: usize, chunk_size: ChunkSize, out: &Path) -> Result<()> {
    let session = load_session(path, chunk_size).await?;
    let count = session.chunks().len();

    if part == 0 || part > count {
        anyhow::bail!(
            "Part {} does not exist ({} {} available)",
            part,
            count,
            if count == 1 { "part" } else { "parts" }
        );
    }

    let written = save_chunk(&session, part - 1, out).await?;
    println!("{} {}", "Saved".green(), written.display());

    Ok(())
}
