use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.store.stats(Utc::now());

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(&stats)?;
            output["masteredPercent"] = serde_json::json!(stats.mastered_percent());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Mastered   {} ({:.1}% of {})",
                paint(&stats.mastered.to_string(), Color::GREEN, use_color),
                stats.mastered_percent(),
                stats.total_words
            );
            println!(
                "Reviewing  {}",
                paint(&stats.reviewing.to_string(), Color::BLUE, use_color)
            );
            println!("Untouched  {}", stats.untouched);
            println!(
                "Today      {} words ({} due reviews)",
                stats.queue_size, stats.due_today
            );
        }
    }

    Ok(())
}
