//! Play-head clock and the per-frame scheduler seam.
//!
//! The clock never reads wall time itself. Hosts feed it frame timestamps (through a
//! [`FrameScheduler`]) or raw deltas, which keeps playback deterministic under test.

use crate::scene::model::Scene;

/// Per-frame callback source provided by the host (e.g. the display's animation-frame loop).
pub trait FrameScheduler {
    /// Begin delivering frame callbacks.
    fn start(&mut self);

    /// Stop delivering frame callbacks. Must take effect before returning.
    fn stop(&mut self);

    /// `true` while callbacks are scheduled.
    fn is_running(&self) -> bool;

    /// Host timestamp (milliseconds, monotonic) of the next due frame, if any.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Deterministic scheduler producing a frame every `step_ms` while running.
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    step_ms: f64,
    now_ms: f64,
    running: bool,
    starts: u32,
    stops: u32,
}

impl FixedStepScheduler {
    /// Scheduler ticking every `step_ms` milliseconds.
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            now_ms: 0.0,
            running: false,
            starts: 0,
            stops: 0,
        }
    }

    /// Current fake host time.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// `(start calls, stop calls)` so far.
    pub fn transitions(&self) -> (u32, u32) {
        (self.starts, self.stops)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn next_frame(&mut self) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.now_ms += self.step_ms;
        Some(self.now_ms)
    }
}

/// Play-head state exposed to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Playhead {
    /// Position in seconds, `0 <= current_time <= duration`.
    pub current_time: f64,
    /// `true` while the clock advances.
    pub is_playing: bool,
    /// Scene duration in seconds.
    pub duration: f64,
}

impl Playhead {
    /// Position as a fraction of the duration (for the progress bar).
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    /// Seconds left until the end of the scene.
    pub fn remaining(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }
}

/// Result of feeding time to the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    /// Nothing committed (stopped, or still batching a partial frame).
    Idle,
    /// `current_time` moved forward.
    Advanced,
    /// `current_time` reached the duration and the clock stopped.
    Ended,
}

/// `Stopped ⇄ Playing` play-head state machine with batched commits.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    playhead: Playhead,
    frame_interval_ms: f64,
    accumulated_ms: f64,
    last_frame_ms: Option<f64>,
    commits: u64,
}

impl PlaybackClock {
    /// Clock committing at most once per `frame_interval_ms`.
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            playhead: Playhead::default(),
            frame_interval_ms,
            accumulated_ms: 0.0,
            last_frame_ms: None,
            commits: 0,
        }
    }

    /// Current play-head state.
    pub fn playhead(&self) -> Playhead {
        self.playhead
    }

    /// Play-head position in seconds.
    pub fn current_time(&self) -> f64 {
        self.playhead.current_time
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playhead.is_playing
    }

    /// Number of committed updates since construction.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Rewind to 0, stop, and adopt a new duration (scene activation / close).
    pub fn reset(&mut self, duration: f64) {
        self.playhead = Playhead {
            current_time: 0.0,
            is_playing: false,
            duration: sanitize_secs(duration),
        };
        self.accumulated_ms = 0.0;
        self.last_frame_ms = None;
    }

    /// Start playing. A clock parked at the end rewinds first. Returns `false` for empty scenes.
    pub fn play(&mut self) -> bool {
        if self.playhead.duration <= 0.0 {
            return false;
        }
        if self.playhead.current_time >= self.playhead.duration {
            self.playhead.current_time = 0.0;
        }
        self.playhead.is_playing = true;
        self.accumulated_ms = 0.0;
        self.last_frame_ms = None;
        true
    }

    /// Stop playing, keeping the position.
    pub fn pause(&mut self) {
        self.playhead.is_playing = false;
        self.accumulated_ms = 0.0;
        self.last_frame_ms = None;
    }

    /// Flip between playing and paused; returns the new `is_playing`.
    pub fn toggle(&mut self) -> bool {
        if self.playhead.is_playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Jump to `fraction` of the duration (progress-bar scrub). Returns the new time.
    pub fn seek_fraction(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.seek_secs(fraction * self.playhead.duration)
    }

    /// Jump to an absolute time, clamped to `[0, duration]`. Returns the new time.
    pub fn seek_secs(&mut self, secs: f64) -> f64 {
        self.playhead.current_time = sanitize_secs(secs).min(self.playhead.duration);
        self.accumulated_ms = 0.0;
        self.playhead.current_time
    }

    /// Delta since the previous frame callback; the first frame after (re)starting counts as 0.
    pub fn frame_delta(&mut self, timestamp_ms: f64) -> f64 {
        let delta = self
            .last_frame_ms
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_frame_ms = Some(timestamp_ms);
        delta
    }

    /// Accumulate `delta_ms` of wall time and commit when a whole frame has elapsed or the
    /// scene is about to end.
    pub fn advance(&mut self, delta_ms: f64) -> ClockEvent {
        if !self.playhead.is_playing {
            return ClockEvent::Idle;
        }
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.accumulated_ms += delta_ms;
        }

        let target = self.playhead.current_time + self.accumulated_ms / 1000.0;
        let about_to_end = target >= self.playhead.duration;
        if self.accumulated_ms < self.frame_interval_ms && !about_to_end {
            return ClockEvent::Idle;
        }

        self.playhead.current_time = target.min(self.playhead.duration);
        self.accumulated_ms = 0.0;
        self.commits += 1;

        if self.playhead.current_time >= self.playhead.duration {
            self.playhead.is_playing = false;
            self.last_frame_ms = None;
            tracing::debug!(duration = self.playhead.duration, "playback reached end");
            return ClockEvent::Ended;
        }
        ClockEvent::Advanced
    }
}

/// Duration used for a scene activation: the scene's own duration, else the narration's natural
/// length, else `default_secs`.
pub fn resolve_duration(scene: &Scene, narration_secs: Option<f64>, default_secs: f64) -> f64 {
    let usable = |d: &f64| d.is_finite() && *d > 0.0;
    scene
        .duration_secs
        .filter(usable)
        .or_else(|| narration_secs.filter(usable))
        .unwrap_or(default_secs)
}

/// `m:ss` label for a time in seconds.
pub fn format_timecode(secs: f64) -> String {
    let whole = sanitize_secs(secs).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
