use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, term: &str, format: &OutputFormat) -> Result<()> {
    let record = app.find_record(term)?.clone();
    let retired = app.store.toggle_retired(record.key).unwrap_or(false);
    app.save()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "term": record.term, "retired": retired });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if retired {
                println!("'{}' marked as mastered", record.term);
            } else {
                println!("'{}' is back in rotation", record.term);
            }
        }
    }

    Ok(())
}
