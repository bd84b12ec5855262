use anyhow::Result;

use vocabgram_lib::corpus::{format_frequency, search_records};

use crate::app::App;
use crate::render::terminal::{paint, truncate, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    search: Option<&str>,
    limit: usize,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    app.require_corpus()?;
    let query = search.unwrap_or("");
    let corpus = app.store.corpus();
    let entries = search_records(corpus, app.store.progress(), app.store.retired(), query, limit);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No words matching '{}'.", query);
                return Ok(());
            }

            for entry in &entries {
                let record = entry.record;
                let (mark, term) = if entry.retired {
                    ("[x]", paint(&record.term, Color::GREEN, use_color))
                } else {
                    ("[ ]", record.term.clone())
                };
                let padding = 24usize.saturating_sub(record.term.chars().count());
                println!(
                    "{} {}{} {:>6}  Stage {}  {}",
                    mark,
                    term,
                    " ".repeat(padding),
                    format_frequency(record.frequency),
                    entry.stage,
                    paint(&truncate(&record.definition, 40), Color::GRAY, use_color)
                );
            }

            if query.trim().is_empty() && corpus.len() > entries.len() {
                println!(
                    "\nShowing the first {} of {} words; use --search to find others",
                    entries.len(),
                    corpus.len()
                );
            }
        }
    }

    Ok(())
}
