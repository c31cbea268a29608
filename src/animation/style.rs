use crate::{
    foundation::core::{Millis, Vec2},
    foundation::math::{clamp01, lerp_vec2},
    markers::resolver::MarkerResolver,
    scene::model::{AnimationBehavior, AnimationKind, AnimationSpec, SlideDirection},
};

/// Timing and distance of entry/exit transitions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionParams {
    /// Length of each transition window in milliseconds.
    pub window_ms: f64,
    /// Slide travel in canonical units.
    pub slide_distance: f64,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            window_ms: 1000.0,
            slide_distance: 50.0,
        }
    }
}

/// How a marker reference resolved for one edge of an element's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerBound {
    /// The element references no marker for this edge.
    Unbound,
    /// A marker is referenced but has no timestamp (not loaded, failed, or unresolved).
    Unresolved,
    /// Resolved timestamp.
    At(Millis),
}

impl MarkerBound {
    /// Resolve an optional marker reference.
    pub fn lookup(marker_id: Option<&str>, markers: &MarkerResolver) -> Self {
        match marker_id {
            None => Self::Unbound,
            Some(id) => markers.resolve(id).map_or(Self::Unresolved, Self::At),
        }
    }
}

/// Where in its lifecycle an element is at the sampled time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AnimationPhase {
    /// No animation configured.
    Static,
    /// Waiting for the start marker.
    BeforeEnter,
    /// Inside the entry window.
    Entering {
        /// Linear progress in `[0, 1]`.
        progress: f64,
    },
    /// Fully shown.
    Shown,
    /// Inside the exit window.
    Exiting {
        /// Linear progress in `[0, 1]`.
        progress: f64,
    },
    /// Past the end marker.
    AfterExit,
}

/// Instantaneous visual state of an element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in canonical units.
    pub offset: Vec2,
    /// `true` while inside an entry or exit window.
    pub is_transitioning: bool,
    /// Lifecycle phase.
    pub phase: AnimationPhase,
}

impl AnimationStyle {
    /// Fully opaque, untranslated, not animating.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        is_transitioning: false,
        phase: AnimationPhase::Static,
    };

    /// Resolve the style of an element whose markers live in `markers`.
    pub fn for_element(
        spec: &AnimationSpec,
        markers: &MarkerResolver,
        t_secs: f64,
        params: TransitionParams,
    ) -> Self {
        resolve_style(
            spec.kind,
            spec.behavior,
            spec.direction,
            MarkerBound::lookup(spec.start_marker_id.as_deref(), markers),
            MarkerBound::lookup(spec.end_marker_id.as_deref(), markers),
            t_secs,
            params,
        )
    }
}

/// Canonical offset an entering slide starts from.
///
/// Right/down travel starts on the negative side, left/up on the positive side.
pub fn slide_entry_offset(direction: SlideDirection, distance: f64) -> Vec2 {
    match direction {
        SlideDirection::Right => Vec2::new(-distance, 0.0),
        SlideDirection::Down => Vec2::new(0.0, -distance),
        SlideDirection::Left => Vec2::new(distance, 0.0),
        SlideDirection::Up => Vec2::new(0.0, distance),
    }
}

/// Compute the style at play-head time `t_secs`.
///
/// The exit edge is evaluated first and wins whenever it is active. An exit window that starts
/// before the entry window ends (markers closer than one window) is not clamped.
pub fn resolve_style(
    kind: AnimationKind,
    behavior: AnimationBehavior,
    direction: SlideDirection,
    start: MarkerBound,
    end: MarkerBound,
    t_secs: f64,
    params: TransitionParams,
) -> AnimationStyle {
    if kind == AnimationKind::None {
        return AnimationStyle::IDENTITY;
    }

    let now_ms = t_secs * 1000.0;
    let window = params.window_ms;
    let (entry_offset, exit_offset) = match kind {
        AnimationKind::Slide => {
            let entry = slide_entry_offset(direction, params.slide_distance);
            (entry, -entry)
        }
        _ => (Vec2::ZERO, Vec2::ZERO),
    };

    if behavior.has_exit()
        && let MarkerBound::At(end) = end
    {
        let end_ms = end.0 as f64;
        let window_start = end_ms - window;
        if now_ms >= end_ms {
            return AnimationStyle {
                opacity: 0.0,
                offset: exit_offset,
                is_transitioning: false,
                phase: AnimationPhase::AfterExit,
            };
        }
        if now_ms >= window_start {
            let progress = progress_in(now_ms - window_start, window);
            return AnimationStyle {
                opacity: 1.0 - progress,
                offset: lerp_vec2(Vec2::ZERO, exit_offset, progress),
                is_transitioning: true,
                phase: AnimationPhase::Exiting { progress },
            };
        }
    }

    if behavior.has_enter() {
        let before_enter = AnimationStyle {
            opacity: 0.0,
            offset: entry_offset,
            is_transitioning: false,
            phase: AnimationPhase::BeforeEnter,
        };
        match start {
            MarkerBound::Unbound => {}
            // A start marker that never resolves keeps the element waiting.
            MarkerBound::Unresolved => return before_enter,
            MarkerBound::At(start) => {
                let start_ms = start.0 as f64;
                if now_ms < start_ms {
                    return before_enter;
                }
                if now_ms < start_ms + window {
                    let progress = progress_in(now_ms - start_ms, window);
                    return AnimationStyle {
                        opacity: progress,
                        offset: lerp_vec2(entry_offset, Vec2::ZERO, progress),
                        is_transitioning: true,
                        phase: AnimationPhase::Entering { progress },
                    };
                }
            }
        }
    }

    AnimationStyle {
        opacity: 1.0,
        offset: Vec2::ZERO,
        is_transitioning: false,
        phase: AnimationPhase::Shown,
    }
}

fn progress_in(elapsed_ms: f64, window_ms: f64) -> f64 {
    if window_ms <= 0.0 {
        return 1.0;
    }
    clamp01(elapsed_ms / window_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
