use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use vocabgram_lib::corpus::load_corpus_in_background;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, path: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let options = app.config.import_options();

    // Parse on the blocking pool; the store only sees the finished corpus
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start import worker")?;
    let result = runtime.block_on(load_corpus_in_background(bytes, options));

    let status = app.store.apply_import(result);
    if status.is_loaded() {
        app.save()?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Plain => {
            let color = if status.is_loaded() { Color::GREEN } else { Color::RED };
            println!("{}", paint(&status.message(), color, use_color));
        }
    }

    if !status.is_loaded() {
        bail!("Import of {:?} failed", path);
    }
    Ok(())
}
