//! Terminal styling for notices and errors.

use colored::{ColoredString, Colorize};

pub struct Theme;

impl Theme {
    pub fn success(text: &str) -> ColoredString {
        text.green().bold()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red().bold()
    }

    pub fn primary(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn secondary(text: &str) -> ColoredString {
        text.white()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }
}
