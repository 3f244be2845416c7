//! CLI Output Formatting Module
//! Consistent, colorized output for terminal UX

use colored::Colorize;
use std::io::{self, Write};

/// Writes styled lines to any output stream.
pub struct Printer<W: Write> {
    out: W,
}

impl Printer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "✓".green().bold(), message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "✗".red().bold(), message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "⚠".yellow().bold(), message)
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "ℹ".blue().bold(), message)
    }

    /// Print a section header
    pub fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}", title.bright_cyan().bold())?;
        writeln!(self.out, "{}", "─".repeat(title.chars().count()).bright_black())
    }

    pub fn kv(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.out, "  {}: {}", key.bright_white().bold(), value)
    }

    pub fn item(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "  {} {}", "•".bright_black(), text)
    }

    pub fn table_header(&mut self, columns: &[&str]) -> io::Result<()> {
        let plain = columns.join(" │ ");
        let header = columns
            .iter()
            .map(|c| c.bright_white().bold().to_string())
            .collect::<Vec<_>>()
            .join(" │ ");
        writeln!(self.out, "  {}", header)?;
        writeln!(self.out, "  {}", "─".repeat(plain.chars().count()).bright_black())
    }

    pub fn table_row(&mut self, values: &[&str]) -> io::Result<()> {
        writeln!(self.out, "  {}", values.join(" │ "))
    }

    /// Print text without a trailing newline and flush, for prompts.
    pub fn prompt(&mut self, label: &str) -> io::Result<()> {
        write!(self.out, "{} ", label.bold())?;
        self.out.flush()
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer sentence", 8), "a longe…");
        assert_eq!(truncate("привіт світ", 6), "приві…");
    }

    #[test]
    fn test_printer_writes_text() {
        let mut printer = Printer::new(Vec::new());
        printer.success("saved").unwrap();
        printer.kv("tasks", "20").unwrap();
        printer.table_row(&["1", "title"]).unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert!(out.contains("saved"));
        assert!(out.contains("20"));
        assert!(out.contains("1 │ title"));
    }
}
