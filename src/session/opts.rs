use crate::{
    animation::style::TransitionParams,
    foundation::error::{PlayerError, PlayerResult},
    transform::viewport::ViewportTransform,
};

/// Tunables of a [`crate::PreviewSession`].
///
/// Every field has a default, so a partial JSON document (`--opts` on the CLI) only needs to name
/// what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewOpts {
    /// Minimum wall time between committed play-head updates.
    pub frame_interval_ms: f64,
    /// Narration drift tolerated before re-seeking it to the play-head.
    pub drift_tolerance_ms: f64,
    /// Length of entry/exit transition windows.
    pub transition_window_ms: f64,
    /// Slide travel in canonical units.
    pub slide_distance_px: f64,
    /// Scale used until the surface is measured.
    pub fallback_scale: f64,
    /// Duration used when neither the scene nor its narration provides one.
    pub default_duration_secs: f64,
    /// Lifetime of transient notices.
    pub notice_ttl_ms: f64,
    /// Automatic retries after a narration playback failure.
    pub audio_retry_limit: u32,
    /// Delay before an automatic narration retry.
    pub audio_retry_delay_ms: f64,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            drift_tolerance_ms: 300.0,
            transition_window_ms: 1000.0,
            slide_distance_px: 50.0,
            fallback_scale: ViewportTransform::DEFAULT_FALLBACK_SCALE,
            default_duration_secs: 10.0,
            notice_ttl_ms: 4000.0,
            audio_retry_limit: 1,
            audio_retry_delay_ms: 1000.0,
        }
    }
}

impl PreviewOpts {
    /// Reject non-finite or out-of-range values.
    pub fn validate(&self) -> PlayerResult<()> {
        let positive = [
            ("frame_interval_ms", self.frame_interval_ms),
            ("transition_window_ms", self.transition_window_ms),
            ("fallback_scale", self.fallback_scale),
            ("default_duration_secs", self.default_duration_secs),
            ("notice_ttl_ms", self.notice_ttl_ms),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlayerError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("drift_tolerance_ms", self.drift_tolerance_ms),
            ("slide_distance_px", self.slide_distance_px),
            ("audio_retry_delay_ms", self.audio_retry_delay_ms),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlayerError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Transition timing derived from these options.
    pub fn transition_params(&self) -> TransitionParams {
        TransitionParams {
            window_ms: self.transition_window_ms,
            slide_distance: self.slide_distance_px,
        }
    }

    /// Parse a (possibly partial) JSON options document and validate it.
    pub fn from_json_str(s: &str) -> PlayerResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
