use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, daily_target: Option<u32>, format: &OutputFormat) -> Result<()> {
    if let Some(target) = daily_target {
        app.store
            .set_daily_target(target)
            .context("Invalid daily target")?;
        app.save()?;
    }

    let settings = app.store.settings();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
        OutputFormat::Plain => {
            println!("Daily new-word limit: {}", settings.daily_target);
            println!("Due reviews are always scheduled first and are not limited.");
        }
    }

    Ok(())
}
