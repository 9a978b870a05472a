//! Table rendering utilities for CLI outputs.
//!
//! Cells hold plain text; colors are applied per row so ANSI codes never
//! disturb the column widths.

use crate::utils::colors::RESET;
use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<(Option<&'static str>, Vec<String>)>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push((None, row));
    }

    pub fn add_colored_row(&mut self, color: &'static str, row: Vec<String>) {
        self.rows.push((Some(color), row));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for (_, row) in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let line = |cells: &[String]| -> String {
            let mut s = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                s.push_str(cell);
                s.push_str(&" ".repeat(w.saturating_sub(cell.width()) + 2));
            }
            s.trim_end().to_string()
        };

        out.push_str(&line(self.headers.as_slice()));
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for (color, row) in &self.rows {
            match color {
                Some(c) => out.push_str(&format!("{}{}{}", c, line(row.as_slice()), RESET)),
                None => out.push_str(&line(row.as_slice())),
            }
            out.push('\n');
        }

        out
    }
}
