//! Global icschunk configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkSize, DEFAULT_CHUNK_SIZE};
use crate::error::{IcsChunkError, IcsChunkResult};

static DEFAULT_OUTPUT_DIR: &str = ".";

/// Prefix for environment overrides, e.g. `ICSCHUNK_CHUNK_SIZE=4096`.
pub const ENV_PREFIX: &str = "ICSCHUNK";

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Configuration at ~/.config/icschunk/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IcsChunkConfig {
    /// Bytes per chunk. Zero is accepted here and rejected by [`Self::chunk_size`].
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    /// Where downloaded chunks are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for IcsChunkConfig {
    fn default() -> Self {
        IcsChunkConfig {
            chunk_size: default_chunk_size(),
            output_dir: default_output_dir(),
        }
    }
}

impl IcsChunkConfig {
    pub fn config_path() -> IcsChunkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IcsChunkError::Config("Could not determine config directory".into()))?
            .join("icschunk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, creating a commented-out file if missing.
    /// `ICSCHUNK_*` environment variables override the file.
    pub fn load() -> IcsChunkResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(
            &config_path,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Load from `path` (optional) layered under `env`.
    pub fn load_from(path: &Path, env: Environment) -> IcsChunkResult<Self> {
        let config: IcsChunkConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| IcsChunkError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| IcsChunkError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// The configured chunk size, or `InvalidChunkSize` if it is zero.
    pub fn chunk_size(&self) -> IcsChunkResult<ChunkSize> {
        ChunkSize::new(self.chunk_size)
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> IcsChunkResult<String> {
        toml::to_string_pretty(self).map_err(|e| IcsChunkError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> IcsChunkResult<()> {
        let contents = format!(
            "\
# icschunk configuration

# Bytes per chunk (default 1 MiB):
# chunk_size = {}

# Where downloaded chunks are written:
# output_dir = \"{}\"
",
            DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                IcsChunkError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| IcsChunkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(::config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(
                vars.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = IcsChunkConfig::load_from(&dir.path().join("config.toml"), no_env()).unwrap();
        assert_eq!(config, IcsChunkConfig::default());
        assert_eq!(config.chunk_size().unwrap().get(), 1_048_576);
    }

    #[test]
    fn default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        IcsChunkConfig::create_default_config(&path).unwrap();

        let config = IcsChunkConfig::load_from(&path, no_env()).unwrap();
        assert_eq!(config, IcsChunkConfig::default());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chunk_size = 4096\noutput_dir = \"/tmp/parts\"\n").unwrap();

        let config = IcsChunkConfig::load_from(&path, no_env()).unwrap();
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.output_path(), PathBuf::from("/tmp/parts"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chunk_size = 4096\n").unwrap();

        let config =
            IcsChunkConfig::load_from(&path, env(&[("ICSCHUNK_CHUNK_SIZE", "512")])).unwrap();
        assert_eq!(config.chunk_size, 512);
    }

    #[test]
    fn zero_chunk_size_is_a_config_violation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chunk_size = 0\n").unwrap();

        let config = IcsChunkConfig::load_from(&path, no_env()).unwrap();
        assert!(matches!(
            config.chunk_size(),
            Err(IcsChunkError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chunk_size = \"lots\"\n").unwrap();

        let err = IcsChunkConfig::load_from(&path, no_env()).unwrap_err();
        assert!(matches!(err, IcsChunkError::Config(_)));
    }

    #[test]
    fn effective_config_renders_every_key() {
        let rendered = IcsChunkConfig::default().to_toml().unwrap();
        assert!(rendered.contains("chunk_size = 1048576"));
        assert!(rendered.contains("output_dir = \".\""));
    }
}
