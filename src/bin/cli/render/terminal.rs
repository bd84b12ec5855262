use vocabgram_lib::review::{format_interval, INTERVALS, MAX_STAGE};
use vocabgram_lib::VocabularyRecord;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in a color code when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= width && !text.contains('\n') {
        return first_line.to_string();
    }
    let kept: String = first_line.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Label for the next review interval after a "known" rating at `stage`
pub fn next_interval_label(stage: usize) -> String {
    format_interval(INTERVALS[(stage + 1).min(MAX_STAGE)])
}

/// Render the front and, if revealed, the back of a card
pub fn render_card(record: &VocabularyRecord, reveal: bool, use_color: bool) -> String {
    let mut lines = Vec::new();

    lines.push(paint(&record.term, Color::BOLD, use_color));
    if !record.phonetic.is_empty() {
        lines.push(paint(&record.phonetic, Color::GRAY, use_color));
    }

    if reveal {
        lines.push(String::new());
        lines.extend(wrap_lines(&record.definition, "  ", 80));
        if !record.example_sentence.is_empty() {
            lines.push(String::new());
            for line in wrap_lines(&record.example_sentence, "  ", 80) {
                lines.push(paint(&line, Color::ITALIC, use_color));
            }
        }
    }

    lines.join("\n")
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    lines
}
