//! Terminal output for the watermark commands
//!
//! Progress lines go to stdout, problems to stderr so `--format json`
//! output on stdout stays parseable.

use owo_colors::OwoColorize;
use std::time::Duration;

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> String {
        match self {
            Tone::Success => "✓".green().to_string(),
            Tone::Error => "✗".red().to_string(),
            Tone::Warning => "⚠".yellow().to_string(),
            Tone::Info => "ℹ".blue().to_string(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Error | Tone::Warning)
    }
}

fn emit(tone: Tone, message: &str) {
    let line = format!("{} {message}", tone.symbol());
    if tone.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// One-line status messages and the screens built from them
pub struct Status;

impl Status {
    /// Completed step
    pub fn success(message: &str) {
        emit(Tone::Success, message);
    }

    /// Failure, on stderr
    pub fn error(message: &str) {
        emit(Tone::Error, message);
    }

    /// Something the server may reject, on stderr
    pub fn warning(message: &str) {
        emit(Tone::Warning, message);
    }

    /// Neutral note
    pub fn info(message: &str) {
        emit(Tone::Info, message);
    }

    /// Bold title underlined to its display width
    pub fn header(title: &str) {
        println!("\n{}\n{}", title.bold(), "─".repeat(title.chars().count()));
    }

    /// Aligned `label: value` line under a header
    pub fn field(label: &str, value: &str) {
        println!("  {:<12} {value}", format!("{label}:").dimmed());
    }

    /// A routed screen: icon and title, then the body text indented
    pub fn view(icon: &str, title: &str, body: &str, is_error: bool) {
        let heading = if is_error {
            format!("{} {}", icon.red(), title.red().bold())
        } else {
            format!("{} {}", icon.blue(), title.bold())
        };
        println!("\n  {heading}\n");
        body.lines().for_each(|line| println!("  {line}"));
        println!();
    }
}

/// `420ms`, `3.2s` or `2m 5s`
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    match millis {
        0..=999 => format!("{millis}ms"),
        1_000..=59_999 => format!("{:.1}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}

/// Size in the largest binary unit that keeps the value at or above one
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// `1 file`, `2 files`
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{count} {noun}")
}
