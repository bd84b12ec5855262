use anyhow::{bail, Result};

use crate::app::App;

pub fn run(app: &mut App, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This deletes all words, progress and settings. Re-run with --yes to confirm.");
    }

    app.store.reset();
    app.save()?;
    println!("All data cleared from {:?}", app.storage.base_path());
    Ok(())
}
