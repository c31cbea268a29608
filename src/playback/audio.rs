use crate::foundation::error::{PlayerError, PlayerResult};

/// Host audio player for a scene's narration, clocked independently of the visuals.
pub trait NarrationTrack {
    /// Point the player at a new narration URL.
    fn load(&mut self, url: &str);

    /// Start (or resume) playback. Autoplay rejections and decode failures surface as `Err`.
    fn play(&mut self) -> PlayerResult<()>;

    /// Pause playback, keeping the position.
    fn pause(&mut self);

    /// Move the playback position.
    fn seek(&mut self, secs: f64);

    /// Reported playback position, `None` while unknown (nothing loaded yet).
    fn position(&self) -> Option<f64>;

    /// Natural length of the loaded narration, once known.
    fn natural_duration(&self) -> Option<f64>;

    /// Output gain in `[0, 1]`.
    fn set_volume(&mut self, gain: f64);

    /// Mute or unmute output.
    fn set_muted(&mut self, muted: bool);
}

/// Narration track that plays nothing and reports no position.
#[derive(Clone, Debug, Default)]
pub struct SilentTrack {
    url: Option<String>,
}

impl NarrationTrack for SilentTrack {
    fn load(&mut self, url: &str) {
        self.url = Some(url.to_owned());
    }

    fn play(&mut self) -> PlayerResult<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _secs: f64) {}

    fn position(&self) -> Option<f64> {
        None
    }

    fn natural_duration(&self) -> Option<f64> {
        None
    }

    fn set_volume(&mut self, _gain: f64) {}

    fn set_muted(&mut self, _muted: bool) {}
}

/// What the reconciliation step did to the narration track.
#[derive(Debug)]
pub enum AudioEvent {
    /// Nothing to do.
    InSync,
    /// Drift exceeded the tolerance and the track was re-seeked.
    Reseeked {
        /// Track position before the seek.
        from: f64,
        /// Clock position the track was moved to.
        to: f64,
    },
    /// `play` failed; visuals keep running.
    PlaybackFailed {
        /// Failure reported by the track.
        error: PlayerError,
        /// `true` when an automatic retry is scheduled.
        will_retry: bool,
    },
    /// A retry succeeded.
    Recovered,
}

/// Keeps the narration loosely in step with the play-head and owns volume/mute.
#[derive(Clone, Debug)]
pub struct AudioSync {
    drift_tolerance_secs: f64,
    retry_limit: u32,
    retry_delay_ms: f64,
    retries_used: u32,
    retry_in_ms: Option<f64>,
    gave_up: bool,
    volume: u8,
    muted: bool,
    reseeks: u64,
}

impl AudioSync {
    /// Reconciler re-seeking beyond `drift_tolerance_ms` and retrying failed playback
    /// `retry_limit` times, each `retry_delay_ms` after the failure.
    pub fn new(drift_tolerance_ms: f64, retry_limit: u32, retry_delay_ms: f64) -> Self {
        Self {
            drift_tolerance_secs: drift_tolerance_ms / 1000.0,
            retry_limit,
            retry_delay_ms,
            retries_used: 0,
            retry_in_ms: None,
            gave_up: false,
            volume: 100,
            muted: false,
            reseeks: 0,
        }
    }

    /// Volume in `0..=100`.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// `true` when muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Number of drift corrections so far.
    pub fn reseeks(&self) -> u64 {
        self.reseeks
    }

    /// `true` while an automatic retry is scheduled.
    pub fn retry_pending(&self) -> bool {
        self.retry_in_ms.is_some()
    }

    /// `true` once playback failed and no retry is left; the track is no longer driven.
    pub fn gave_up(&self) -> bool {
        self.gave_up
    }

    /// Forget retry bookkeeping (scene activation).
    pub fn reset(&mut self) {
        self.retries_used = 0;
        self.retry_in_ms = None;
        self.gave_up = false;
    }

    /// Push volume and mute state to a freshly loaded track.
    pub fn apply_output(&self, track: &mut dyn NarrationTrack) {
        track.set_volume(self.gain());
        track.set_muted(self.muted);
    }

    /// Seek the track to the play-head and start it.
    pub fn start(&mut self, track: &mut dyn NarrationTrack, at_secs: f64) -> AudioEvent {
        track.seek(at_secs);
        match track.play() {
            Ok(()) => {
                self.gave_up = false;
                AudioEvent::InSync
            }
            Err(error) => self.fail(error),
        }
    }

    /// Pause the track and drop any scheduled retry.
    pub fn stop(&mut self, track: &mut dyn NarrationTrack) {
        self.retry_in_ms = None;
        track.pause();
    }

    /// Per-frame reconciliation while the clock is playing.
    ///
    /// The target is the play-head clamped to the narration's natural length, so a narration
    /// that ran out before the scene end is left at its end instead of being re-seeked every
    /// frame. A track that failed with no retry left is not touched.
    pub fn reconcile(
        &mut self,
        track: &mut dyn NarrationTrack,
        clock_secs: f64,
        is_playing: bool,
        delta_ms: f64,
    ) -> AudioEvent {
        if !is_playing || self.gave_up {
            return AudioEvent::InSync;
        }

        if let Some(remaining) = self.retry_in_ms {
            let remaining = remaining - delta_ms.max(0.0);
            if remaining > 0.0 {
                self.retry_in_ms = Some(remaining);
                return AudioEvent::InSync;
            }
            self.retry_in_ms = None;
            self.retries_used += 1;
            tracing::debug!(attempt = self.retries_used, "retrying narration playback");
            track.seek(clock_secs);
            return match track.play() {
                Ok(()) => {
                    self.gave_up = false;
                    AudioEvent::Recovered
                }
                Err(error) => self.fail(error),
            };
        }

        let Some(position) = track.position() else {
            return AudioEvent::InSync;
        };
        let target = match track.natural_duration() {
            Some(len) if len.is_finite() && len >= 0.0 => clock_secs.min(len),
            _ => clock_secs,
        };
        if (position - target).abs() <= self.drift_tolerance_secs {
            return AudioEvent::InSync;
        }
        track.seek(target);
        self.reseeks += 1;
        tracing::trace!(from = position, to = target, "narration drift corrected");
        AudioEvent::Reseeked {
            from: position,
            to: target,
        }
    }

    /// Set volume (`0..=100`, clamped). A positive volume lifts mute. Returns the stored volume.
    pub fn set_volume(&mut self, track: &mut dyn NarrationTrack, volume: f64) -> u8 {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 100.0).round() as u8
        } else {
            self.volume
        };
        self.volume = volume;
        if self.muted && volume > 0 {
            self.muted = false;
            track.set_muted(false);
        }
        track.set_volume(self.gain());
        self.volume
    }

    /// Flip mute; the volume is kept for unmuting. Returns the new mute state.
    pub fn toggle_mute(&mut self, track: &mut dyn NarrationTrack) -> bool {
        self.muted = !self.muted;
        track.set_muted(self.muted);
        self.muted
    }

    /// Effective output gain in `[0, 1]`.
    pub fn gain(&self) -> f64 {
        f64::from(self.volume) / 100.0
    }

    fn fail(&mut self, error: PlayerError) -> AudioEvent {
        let will_retry = self.retries_used < self.retry_limit;
        self.retry_in_ms = will_retry.then_some(self.retry_delay_ms);
        self.gave_up = !will_retry;
        tracing::warn!(error = %error, will_retry, "narration playback failed");
        AudioEvent::PlaybackFailed { error, will_retry }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/audio.rs"]
mod tests;
