// File: brb-core/src/countdown.rs
//
// The 1Hz loop. It is purely time-driven: every tick recomputes what is left
// until the deadline, redraws the message, and stops once the deadline passes.

use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use brb_common::models::{FollowerCounts, Output};
use crate::duration::format_duration;
use crate::template::Template;
use crate::terminal::LiveWriter;
use crate::Error;

pub const TICK: Duration = Duration::from_secs(1);

pub const COMPLETION_MESSAGE: &str = "Stream starting imminently";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running { remaining: Duration },
    Finished,
}

impl CountdownState {
    /// State of a countdown ending at `deadline`, observed at `now`.
    /// `remaining` is exact; [`Output::new`] drops the sub-second part for display.
    pub fn at(deadline: Instant, now: Instant) -> Self {
        if now >= deadline {
            CountdownState::Finished
        } else {
            CountdownState::Running {
                remaining: deadline - now,
            }
        }
    }
}

/// What a finished run did, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownReport {
    /// Countdown frames drawn, not counting the completion message.
    pub frames: usize,
}

pub struct Countdown {
    template: Template,
    followers: FollowerCounts,
    completion_message: String,
}

impl Countdown {
    pub fn new(template: Template, followers: FollowerCounts) -> Self {
        Self {
            template,
            followers,
            completion_message: COMPLETION_MESSAGE.to_string(),
        }
    }

    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = message.into();
        self
    }

    /// Runs the countdown to completion, drawing through `writer`.
    ///
    /// The first frame is drawn straight away and the deadline is anchored to
    /// that first tick, so a 2s countdown shows `2s`, then `1s`, then the
    /// completion message.
    pub async fn run<W: LiveWriter>(
        &self,
        duration: Duration,
        writer: &mut W,
    ) -> Result<CountdownReport, Error> {
        let mut ticker = time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        writer.start()?;

        // The first tick completes immediately.
        let start = ticker.tick().await;
        let deadline = start.checked_add(duration).ok_or_else(|| {
            Error::duration_parse(&format_duration(duration), "deadline out of range")
        })?;
        info!("Counting down {}", format_duration(duration));

        let mut frames = 0;
        let mut now = start;
        while let CountdownState::Running { remaining } = CountdownState::at(deadline, now) {
            let out = Output::new(remaining, self.followers);
            debug!("tick: {} left", format_duration(out.countdown));

            writer.write(&self.template.render_line(&out));
            writer.flush()?;
            frames += 1;

            now = ticker.tick().await;
        }

        writer.write(&format!("\r{}", self.completion_message));
        writer.stop()?;
        info!("Countdown finished after {} frames", frames);

        Ok(CountdownReport { frames })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_finished_at_and_after_deadline() {
        let now = Instant::now();
        assert_eq!(CountdownState::at(now, now), CountdownState::Finished);
        assert_eq!(
            CountdownState::at(now, now + Duration::from_secs(3)),
            CountdownState::Finished
        );
    }

    #[test]
    fn test_remaining_time_is_truncated_only_for_display() {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(2_750);
        let state = CountdownState::at(deadline, now);
        assert_eq!(state, CountdownState::Running { remaining: Duration::from_millis(2_750) });

        let CountdownState::Running { remaining } =
            CountdownState::at(deadline, now + Duration::from_millis(2_500))
        else {
            panic!("still running before the deadline");
        };
        let out = Output::new(remaining, FollowerCounts::default());
        assert_eq!(out.countdown, Duration::ZERO);
    }
}
