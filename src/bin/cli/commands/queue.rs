use anyhow::Result;
use chrono::Utc;

use vocabgram_lib::review::TaskKind;

use crate::app::App;
use crate::render::terminal::{next_interval_label, paint, truncate, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.require_corpus()?;
    let queue = app.store.task_queue(Utc::now());
    let corpus = app.store.corpus();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = queue
                .iter()
                .filter_map(|task| {
                    corpus.get(task.id).map(|record| {
                        serde_json::json!({
                            "id": task.id,
                            "key": task.key,
                            "term": record.term,
                            "kind": task.kind,
                            "stage": task.stage,
                        })
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if queue.is_empty() {
                println!("Nothing to study today.");
                return Ok(());
            }

            println!("{:<4} {:<24} {:<7} {:<6} {}", "#", "Word", "Type", "Stage", "Next");
            println!(
                "{} {} {} {} {}",
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(24),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(6),
                "\u{2500}".repeat(5)
            );

            for (i, task) in queue.iter().enumerate() {
                let Some(record) = corpus.get(task.id) else {
                    continue;
                };
                let kind = match task.kind {
                    TaskKind::Due => paint("review", Color::CYAN, use_color),
                    TaskKind::New => paint("new   ", Color::YELLOW, use_color),
                };
                println!(
                    "{:<4} {:<24} {} LV{:<3} {}",
                    i + 1,
                    truncate(&record.term, 24),
                    kind,
                    task.stage,
                    next_interval_label(task.stage)
                );
            }

            println!(
                "\n{} words ({} reviews, {} new)",
                queue.len(),
                queue.due_count(),
                queue.new_count()
            );
        }
    }

    Ok(())
}
