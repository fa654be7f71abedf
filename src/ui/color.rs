//! ANSI colors and terminal capability detection

use std::env;
use std::io::IsTerminal;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";

    /// Secondary details (verbose line, alternative URLs)
    pub const GRAY: &'static str = Self::BRIGHT_BLACK;
}

/// Wrap `text` in `color` when `enabled`, otherwise return it unchanged
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether stdout should receive ANSI escapes.
///
/// `NO_COLOR` (or `FORCE_COLOR=0`) disables, any other `FORCE_COLOR` enables;
/// otherwise stdout must be a terminal that is not `TERM=dumb`.
pub fn supports_formatting() -> bool {
    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb") | Ok(""))
}

/// Whether stdout is an interactive terminal
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Whether stderr is an interactive terminal
pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}
