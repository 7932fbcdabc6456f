//! TUI rendering for session state.
//!
//! Extension traits that add colored terminal rendering using owo_colors.

use icschunk_core::BinarySource;
use indicatif::HumanCount;
use owo_colors::OwoColorize;

use crate::session::{ChunkEntry, Session, SessionState};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ChunkEntry {
    fn render(&self) -> String {
        format!(
            "Chunk {}: {} bytes",
            self.index + 1,
            HumanCount(self.size)
        )
    }
}

impl<S: BinarySource> Render for Session<S> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(source) = self.selected() {
            lines.push(format!(
                "{} {}",
                "Selected file:".bold().green(),
                source.name().green()
            ));
        }

        match self.state() {
            SessionState::Idle => {}
            SessionState::Validating => lines.push("Parsing and chunking...".blue().to_string()),
            SessionState::Failed(message) => lines.push(message.red().to_string()),
            SessionState::Ready(chunks) => {
                lines.push(format!("Chunks created: {}", chunks.len()).bold().to_string());
                for entry in chunks {
                    lines.push(format!("   {}", entry.render()));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icschunk_core::{ChunkSize, MemorySource};

    #[test]
    fn chunk_entry_is_one_based() {
        let entry = ChunkEntry {
            index: 0,
            size: 1024,
            range: 0..1024,
        };
        assert_eq!(entry.render(), "Chunk 1: 1,024 bytes");

        let entry = ChunkEntry {
            index: 4,
            size: 1_048_576,
            range: 4_194_304..5_242_880,
        };
        assert_eq!(entry.render(), "Chunk 5: 1,048,576 bytes");
    }

    #[tokio::test]
    async fn ready_session_lists_chunks() {
        let mut session = Session::new(ChunkSize::new(1000).unwrap());
        let text = format!("BEGIN:VCALENDAR{}", "A".repeat(2485));
        session
            .load(MemorySource::new("big.ics", text))
            .await
            .unwrap();

        let out = session.render();
        assert!(out.contains(&"big.ics".green().to_string()));
        assert!(out.contains("Chunks created: 3"));
        assert!(out.contains("Chunk 3: 500 bytes"));
    }
}
