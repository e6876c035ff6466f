//! Terminal output helpers: colored notes and a plain table.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Tone::Info => (CYAN, "i", "INFO"),
            Tone::Warn => (YELLOW, "!", "WARN"),
            Tone::Error => (RED, "x", "ERROR"),
            Tone::Success => (GREEN, "+", "OK"),
        }
    }
}

/// Format one note line, colored or plain.
pub fn format_note(tone: Tone, msg: &str, color: bool) -> String {
    let (code, mark, label) = tone.style();
    if color {
        format!("{code}{BOLD}{mark}{RESET} {msg}")
    } else {
        format!("{label}: {msg}")
    }
}

/// Print a note. Errors go to stderr.
pub fn note(tone: Tone, msg: &str) {
    let line = format_note(tone, msg, supports_color());
    if tone == Tone::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Render left-aligned columns separated by two spaces.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![pad_row(headers, &widths), pad_row(&as_strs(&rule), &widths)];
    for row in rows {
        out.push(pad_row(&as_strs(row), &widths));
    }
    out.join("\n")
}

fn as_strs(row: &[String]) -> Vec<&str> {
    row.iter().map(String::as_str).collect()
}

fn pad_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_notes_have_labels() {
        assert_eq!(format_note(Tone::Warn, "careful", false), "WARN: careful");
        assert_eq!(format_note(Tone::Success, "done", false), "OK: done");
    }

    #[test]
    fn colored_notes_reset() {
        let line = format_note(Tone::Error, "boom", true);
        assert!(line.starts_with(RED));
        assert!(line.contains(RESET));
        assert!(line.ends_with("boom"));
    }

    #[test]
    fn renders_table() {
        let rows = vec![
            vec!["warn".to_string(), "security.mode".to_string()],
            vec!["error".to_string(), "execution.napcat_port".to_string()],
        ];
        let table = render_table(&["level", "path"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "level  path");
        assert!(lines[1].starts_with("-----  ----"));
        assert_eq!(lines[3], "error  execution.napcat_port");
    }
}
