// File: brb-core/src/test_utils/recording.rs

use crate::terminal::LiveWriter;
use crate::Error;

/// A [`LiveWriter`] that remembers every flushed frame instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub started: bool,
    pub stopped: bool,
    /// Frames in the order they were flushed.
    pub frames: Vec<String>,
    pending: Option<String>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flushed frames with the leading carriage return removed.
    pub fn texts(&self) -> Vec<&str> {
        self.frames
            .iter()
            .map(|f| f.trim_start_matches('\r'))
            .collect()
    }
}

impl LiveWriter for RecordingWriter {
    fn start(&mut self) -> Result<(), Error> {
        self.started = true;
        Ok(())
    }

    fn write(&mut self, frame: &str) {
        self.pending = Some(frame.to_string());
    }

    fn flush(&mut self) -> Result<(), Error> {
        if let Some(frame) = self.pending.take() {
            if self.started && !self.stopped {
                self.frames.push(frame);
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.flush()?;
        self.stopped = true;
        Ok(())
    }
}
