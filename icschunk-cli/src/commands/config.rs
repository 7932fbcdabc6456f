use anyhow::Result;
use icschunk_core::config::IcsChunkConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = IcsChunkConfig::config_path()?;
    let config = IcsChunkConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Output:  {}", config.output_path().display());
    println!();
    println!("{}", "Effective settings".bold());
    print!("{}", config.to_toml()?);

    Ok(())
}
