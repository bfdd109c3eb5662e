use std::io::{self, Write};

use super::constants::PROMPT;
use super::render::{LineStyle, ScreenLine};

/// Writes rendered lines to any `Write` sink (stdout in the app, a buffer in tests).
pub struct Terminal<W: Write> {
    out: W,
}

impl Terminal<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_lines(&mut self, lines: &[ScreenLine]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}{}", prefix(line.style), line.text)?;
        }
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn prefix(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Heading => "== ",
        LineStyle::Hint => "   ",
        LineStyle::Field => "   ",
        LineStyle::Acknowledgment => "✓  ",
        LineStyle::Status => "»  ",
        LineStyle::Notice => "!  ",
    }
}
