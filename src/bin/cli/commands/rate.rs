use anyhow::Result;
use chrono::Utc;

use vocabgram_lib::review::{format_interval, interval_for_stage, RatingOutcome};
use vocabgram_lib::Rating;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, term: &str, rating: Rating, format: &OutputFormat) -> Result<()> {
    let record = app.find_record(term)?.clone();
    let outcome = app.store.rate(record.key, rating, Utc::now());
    app.save()?;

    match format {
        OutputFormat::Json => {
            let output = match outcome {
                Some(RatingOutcome::Retired { .. }) => serde_json::json!({
                    "term": record.term,
                    "rating": rating,
                    "retired": true,
                }),
                Some(RatingOutcome::Staged { state, .. }) => serde_json::json!({
                    "term": record.term,
                    "rating": rating,
                    "state": state,
                }),
                None => serde_json::Value::Null,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match outcome {
            Some(RatingOutcome::Retired { newly: true }) => {
                println!("'{}' marked as mastered", record.term)
            }
            Some(RatingOutcome::Retired { newly: false }) => {
                println!("'{}' was already mastered", record.term)
            }
            Some(RatingOutcome::Staged { previous, state }) => {
                let from = previous.map_or_else(|| "new".to_string(), |s| format!("LV{}", s));
                println!(
                    "'{}': {} -> LV{}, next review in {}",
                    record.term,
                    from,
                    state.stage,
                    format_interval(interval_for_stage(state.stage))
                );
            }
            None => {}
        },
    }

    Ok(())
}
