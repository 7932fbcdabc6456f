use std::path::Path;

use anyhow::Result;
use icschunk_core::ChunkSize;
use indicatif::HumanCount;
use owo_colors::OwoColorize;

use super::{load_session, save_chunk};

pub async fn run(path: &Path, chunk_size: ChunkSize, out: &Path) -> Result<()> {
    let session = load_session(path, chunk_size).await?;

    // Written one at a time, in index order.
    for entry in session.chunks() {
        let written = save_chunk(&session, entry.index, out).await?;
        println!(
            "{} {} {}",
            "Saved".green(),
            written.display(),
            format!("({} bytes)", HumanCount(entry.size)).dimmed()
        );
    }

    println!("\n{} chunks written to {}", session.chunks().len(), out.display());

    Ok(())
}
