//! Terminal colors for panelc messages.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Error,
    Accent,
}

fn paint(tone: Tone, text: &str, terminal: bool) -> String {
    if !terminal {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.green().to_string(),
        Tone::Error => text.red().bold().to_string(),
        Tone::Accent => text.cyan().to_string(),
    }
}

/// Status line for stderr.
pub fn success(text: impl AsRef<str>) -> String {
    paint(Tone::Success, text.as_ref(), std::io::stderr().is_terminal())
}

/// Error line for stderr.
pub fn error(text: impl AsRef<str>) -> String {
    paint(Tone::Error, text.as_ref(), std::io::stderr().is_terminal())
}

/// Highlight inside stdout listings.
pub fn accent(text: impl AsRef<str>) -> String {
    paint(Tone::Accent, text.as_ref(), std::io::stdout().is_terminal())
}
