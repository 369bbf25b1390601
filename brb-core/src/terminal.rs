//! In-place terminal output for the countdown.
//!
//! [`LiveWriter`] is the seam the countdown loop draws through: `write` stages
//! a full replacement frame, `flush` puts it on screen, and `stop` leaves the
//! last frame in place and hands the terminal back to ordinary line output.
//!
//! [`TerminalWriter`] redraws with `console_static_text` when stdout is an
//! interactive terminal and falls back to writing frames verbatim otherwise.

use std::io::{self, IsTerminal, Write};
use console_static_text::{ConsoleSize, ConsoleStaticText};
use tracing::{debug, warn};
use crate::Error;

pub trait LiveWriter {
    /// Begins a session. Frames are only drawn between `start` and `stop`.
    fn start(&mut self) -> Result<(), Error>;

    /// Stages `frame` as the complete new contents of the live region.
    /// Nothing is drawn until the next [`flush`](Self::flush).
    fn write(&mut self, frame: &str);

    /// Draws the most recently staged frame, if any.
    fn flush(&mut self) -> Result<(), Error>;

    /// Flushes, ends the last frame with a newline and releases the region.
    fn stop(&mut self) -> Result<(), Error>;
}

pub struct TerminalWriter<W: Write> {
    sink: W,
    interactive: bool,
    /// Fixed terminal size; `None` asks the terminal on `start`.
    console_size: Option<ConsoleSize>,
    static_text: Option<ConsoleStaticText>,
    pending: Option<String>,
    active: bool,
    last_frame_ended_line: bool,
}

impl TerminalWriter<io::Stdout> {
    /// Writer on stdout; redraws in place only if stdout is a terminal.
    pub fn stdout() -> Self {
        let interactive = io::stdout().is_terminal();
        Self::new(io::stdout(), interactive)
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(sink: W, interactive: bool) -> Self {
        Self {
            sink,
            interactive,
            console_size: None,
            static_text: None,
            pending: None,
            active: false,
            last_frame_ended_line: true,
        }
    }

    /// Interactive writer for a terminal of a known size.
    pub fn sized(sink: W, size: ConsoleSize) -> Self {
        Self {
            console_size: Some(size),
            ..Self::new(sink, true)
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn draw(&mut self, frame: &str) -> Result<(), Error> {
        match self.static_text.as_mut() {
            Some(static_text) => {
                // console_static_text does its own cursor handling.
                if let Some(seq) = static_text.render(frame.trim_start_matches('\r')) {
                    self.sink.write_all(seq.as_bytes())?;
                }
            }
            None => self.sink.write_all(frame.as_bytes())?,
        }
        self.last_frame_ended_line = frame.ends_with('\n');
        self.sink.flush()?;
        Ok(())
    }
}

impl<W: Write> LiveWriter for TerminalWriter<W> {
    fn start(&mut self) -> Result<(), Error> {
        if self.interactive {
            self.static_text = match self.console_size {
                Some(size) => Some(ConsoleStaticText::new(move || size)),
                None => ConsoleStaticText::new_sized(),
            };
            if self.static_text.is_none() {
                warn!("Could not determine the terminal size; frames will be appended instead of redrawn");
            }
        }
        self.active = true;
        Ok(())
    }

    fn write(&mut self, frame: &str) {
        self.pending = Some(frame.to_string());
    }

    fn flush(&mut self) -> Result<(), Error> {
        let Some(frame) = self.pending.take() else {
            return Ok(());
        };
        if !self.active {
            debug!("Dropping frame staged outside of a session");
            return Ok(());
        }
        self.draw(&frame)
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.flush()?;
        if self.active && !self.last_frame_ended_line {
            self.sink.write_all(b"\n")?;
            self.sink.flush()?;
        }
        self.static_text = None;
        self.active = false;
        Ok(())
    }
}
