//! Frame-at-a-time terminal output.

use crate::errors::TallyError;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};

const FRAME_CAPACITY: usize = 8192;

/// Collects one screen frame and hands it to the sink in a single write.
///
/// Rows are addressed absolutely and blanked before they are drawn, so a frame
/// never depends on what the previous one left on screen.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write = Stdout> {
    sink: W,
    frame: Vec<u8>,
    rows: u16,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            frame: Vec::with_capacity(FRAME_CAPACITY),
            rows: 0,
        }
    }

    /// Move to the start of the next row and blank it.
    pub fn start_row(&mut self) -> io::Result<()> {
        let row = self.rows;
        queue!(self.frame, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        self.rows = row.saturating_add(1);
        Ok(())
    }

    /// Rows started in the current frame.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Bytes queued for the current frame.
    pub fn pending(&self) -> &[u8] {
        &self.frame
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Blank everything below the last row and write the frame out. The
    /// frame is discarded even when the write fails.
    pub fn present(&mut self) -> Result<(), TallyError> {
        queue!(self.frame, Clear(ClearType::FromCursorDown))?;
        let written = self
            .sink
            .write_all(&self.frame)
            .and_then(|()| self.sink.flush());
        self.frame.clear();
        self.rows = 0;
        written?;
        Ok(())
    }
}

impl<W: Write> Write for TerminalRenderer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.frame.extend_from_slice(buf);
        Ok(buf.len())
    }

    // frames leave only through `present`
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
