use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use docs_gateway::initializer::{render_script, ScriptVariant};
use docs_gateway::{DocsConfig, Settings};

// Writes swagger-initializer.js and swagger-config.js for static hosting.
// Usage: render_initializer [OUT_DIR]
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter("render_initializer=info,docs_gateway=info")
        .init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("static"));

    let settings = Settings::from_env().context("invalid settings")?;
    let config = DocsConfig::from_settings(&settings).context("invalid documentation config")?;

    render_to(&out_dir, &config)?;

    println!("Rendered {} sources into {}", config.sources().len(), out_dir.display());
    Ok(())
}

fn render_to(dir: &Path, config: &DocsConfig) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for variant in ScriptVariant::ALL {
        let path = dir.join(variant.file_name());
        fs::write(&path, render_script(config, variant))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
