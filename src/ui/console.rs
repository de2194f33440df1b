//! Headless display: counts frames and optionally echoes them as text.

use std::io::Write;

use crate::model::io::DisplaySink;
use crate::model::sting::Frame;
use crate::model::Rgb;

pub struct ConsoleDisplay<W: Write> {
    out: W,
    echo: bool,
    frames: u64,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, echo: bool) -> Self {
        Self {
            out,
            echo,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `#` for any lit pixel, `.` for black, one row per line.
    pub fn ascii(frame: &Frame) -> String {
        frame
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&p| if p == Rgb::BLACK { '.' } else { '#' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.frames += 1;
        if self.echo {
            writeln!(self.out, "{}", Self::ascii(frame))?;
            writeln!(self.out, "{}", "--".repeat(frame.width() as usize))?;
        }
        Ok(())
    }
}
