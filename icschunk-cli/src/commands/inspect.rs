use std::path::Path;

use anyhow::Result;
use icschunk_core::ChunkSize;

use super::load_session;
use crate::render::Render;

pub async fn run(path: &Path, chunk_size: ChunkSize) -> Result<()> {
    let session = load_session(path, chunk_size).await?;
    println!("{}", session.render());
    Ok(())
}
