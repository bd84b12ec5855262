//! Record parser for comma-delimited text
//!
//! A single left-to-right scan with one "inside quotes" flag:
//! - `,` separates fields, `\n`, `\r\n` or a bare `\r` ends a row
//! - inside quotes, separators and line breaks are literal
//! - `""` inside quotes decodes to one literal `"`
//! - fields are trimmed after quote removal
//!
//! The parser works on already-decoded text; encoding is the loader's concern.

/// A parsed row: ordered, trimmed field values
pub type Row = Vec<String>;

/// Incremental row builder used by the scanner
#[derive(Default)]
struct RowBuilder {
    rows: Vec<Row>,
    row: Row,
    field: String,
    /// Set once any character (quotes included) was consumed for the current row
    row_started: bool,
}

impl RowBuilder {
    fn push_char(&mut self, c: char) {
        self.field.push(c);
        self.row_started = true;
    }

    fn end_field(&mut self) {
        self.row.push(self.field.trim().to_string());
        self.field.clear();
        self.row_started = true;
    }

    /// Close the current row. Blank lines produce nothing.
    fn end_row(&mut self) {
        if !self.row_started {
            return;
        }
        self.end_field();
        self.rows.push(std::mem::take(&mut self.row));
        self.row_started = false;
    }

    fn finish(mut self) -> Vec<Row> {
        self.end_row();
        self.rows
    }
}

/// Parse delimited text into rows of trimmed fields
pub fn parse_records(text: &str) -> Vec<Row> {
    let mut builder = RowBuilder::default();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                    builder.push_char('"');
                } else {
                    in_quotes = !in_quotes;
                    builder.row_started = true;
                }
            }
            ',' if !in_quotes => builder.end_field(),
            '\r' | '\n' if !in_quotes => {
                builder.end_row();
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => builder.push_char(c),
        }
    }

    builder.finish()
}
