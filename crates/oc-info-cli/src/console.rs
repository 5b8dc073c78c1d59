//! Severity-tagged console lines.
//!
//! Errors are red, warnings yellow and successes green. Colour is only
//! emitted when the target stream is a terminal and `NO_COLOR` is unset.
//! Success and plain lines go to `out`; errors and warnings go to `err`.

use std::io::{self, IsTerminal, Write};

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Ok,
}

impl Severity {
    fn ansi_code(self) -> &'static str {
        match self {
            Severity::Error => "31",
            Severity::Warn => "33",
            Severity::Ok => "32",
        }
    }
}

/// Wrap `message` in the colour of `severity` when `colour` is set.
pub fn paint(message: &str, severity: Severity, colour: bool) -> String {
    if colour {
        format!("\x1b[{}m{}\x1b[0m", severity.ansi_code(), message)
    } else {
        message.to_string()
    }
}

fn colour_enabled(is_terminal: bool, no_color_set: bool) -> bool {
    is_terminal && !no_color_set
}

/// Pair of output streams with per-stream colour settings.
pub struct Console<O, E> {
    out: O,
    err: E,
    colour_out: bool,
    colour_err: bool,
}

impl Console<io::Stdout, io::Stderr> {
    /// Console over the process's stdout and stderr.
    pub fn stdio() -> Self {
        let no_color_set = std::env::var_os("NO_COLOR").is_some();
        let out = io::stdout();
        let err = io::stderr();
        Console {
            colour_out: colour_enabled(out.is_terminal(), no_color_set),
            colour_err: colour_enabled(err.is_terminal(), no_color_set),
            out,
            err,
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    /// Console over arbitrary writers, without colour.
    #[cfg(test)]
    pub fn plain(out: O, err: E) -> Self {
        Console {
            out,
            err,
            colour_out: false,
            colour_err: false,
        }
    }

    /// Success line on `out`.
    pub fn ok(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", paint(message, Severity::Ok, self.colour_out))
    }

    /// Uncoloured line on `out`.
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    /// Warning line on `err`.
    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{}", paint(message, Severity::Warn, self.colour_err))
    }

    /// Error line on `err`.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{}", paint(message, Severity::Error, self.colour_err))
    }

    /// Uncoloured line on `err`.
    pub fn error_text(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{message}")
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
