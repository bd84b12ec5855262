use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;

use vocabgram_lib::review::{SessionView, TaskKind};
use vocabgram_lib::{Rating, StudySession};

use crate::app::App;
use crate::render::terminal::{paint, render_card, Color};

enum Input {
    Continue,
    Speak,
    Rate(Rating),
    Quit,
    Unknown,
}

fn read_input(prompt: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Input> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let line = match lines.next() {
        Some(line) => line?,
        None => return Ok(Input::Quit),
    };

    let input = match line.trim() {
        "" => Input::Continue,
        "s" => Input::Speak,
        "q" => Input::Quit,
        other => match other.parse::<Rating>() {
            Ok(rating) => Input::Rate(rating),
            Err(_) => Input::Unknown,
        },
    };
    Ok(input)
}

pub fn run(app: &mut App, use_color: bool) -> Result<()> {
    app.require_corpus()?;

    let speaker = app.speaker();
    let mut session = StudySession::start(&app.store, Utc::now());
    let total = session.queue().len();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let SessionView::Studying { position, answer_visible } = session.view() {
        let Some(task) = session.current().copied() else {
            break;
        };
        let Some(record) = app.store.corpus().get(task.id).cloned() else {
            break;
        };

        let phase = match task.kind {
            TaskKind::Due => "Reviewing",
            TaskKind::New => "New word",
        };
        println!();
        println!(
            "{}  {}",
            paint(&format!("LV{} {}", task.stage, phase), Color::MAGENTA, use_color),
            paint(&format!("{} / {}", position + 1, total), Color::GRAY, use_color)
        );
        println!("{}", render_card(&record, answer_visible, use_color));

        let prompt = if answer_visible {
            "[f]orgot [k]nown [m]astered [enter] hide [s]peak [q]uit >"
        } else {
            "[enter] show [s]peak [q]uit >"
        };

        match read_input(prompt, &mut lines)? {
            Input::Quit => break,
            Input::Speak => speaker.speak(&record.term),
            Input::Continue => session.toggle_answer(),
            Input::Rate(rating) if answer_visible => {
                session.rate(&mut app.store, rating, Utc::now());
                app.save_quietly();
            }
            Input::Rate(_) | Input::Unknown => {}
        }
    }

    if session.view() == SessionView::Complete {
        let stats = app.store.stats(Utc::now());
        println!();
        println!("{}", paint("Session complete!", Color::GREEN, use_color));
        println!(
            "Mastered {} of {} words ({:.1}%), {} in review",
            stats.mastered,
            stats.total_words,
            stats.mastered_percent(),
            stats.reviewing
        );
    }

    Ok(())
}
