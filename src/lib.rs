//! Scene playback and animation timeline engine for a video-authoring preview.
//!
//! A [`PreviewSession`] drives a play-head across the active scene of a project and, for every
//! displayed frame, resolves which elements are visible, where they land on an arbitrarily sized
//! surface, and their instantaneous entry/exit style. The result is a [`RenderDescription`] a
//! stateless surface can draw.
//!
//! - Open a scene list with [`PreviewSession::open`]
//! - Drive frames with [`PreviewSession::pump`] or [`PreviewSession::tick`]
//! - Close with [`PreviewSession::close`] (also run on drop)
//!
//! Markers, narration audio and the frame loop are host collaborators behind the
//! [`MarkerSource`], [`NarrationTrack`] and [`FrameScheduler`] traits.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod markers;
mod playback;
/// Boundary scene model.
pub mod scene;
/// Session-oriented preview API.
pub mod session;
mod transform;

pub use crate::foundation::core::{
    Affine, AspectRatio, Canvas, Millis, Point, Rect, Size, SurfaceSize, Vec2, secs_bucket,
};
pub use crate::foundation::error::{PlayerError, PlayerResult};

pub use crate::animation::style::{
    AnimationPhase, AnimationStyle, MarkerBound, TransitionParams, resolve_style,
    slide_entry_offset,
};
pub use crate::eval::evaluator::{ElementRender, Evaluator, RenderDescription};
pub use crate::eval::fingerprint::FrameFingerprint;
pub use crate::eval::visibility::{VisibilityCache, decide_visibility};
pub use crate::markers::resolver::{
    InMemoryMarkerSource, MarkerResolver, MarkerSource, MarkerStatus, MarkerUpdate,
};
pub use crate::playback::audio::{AudioEvent, AudioSync, NarrationTrack, SilentTrack};
pub use crate::playback::clock::{
    ClockEvent, FixedStepScheduler, FrameScheduler, PlaybackClock, Playhead, format_timecode,
    resolve_duration,
};
pub use crate::playback::notice::{Notice, NoticeBoard, NoticeKind};
pub use crate::scene::model::{
    AnimationBehavior, AnimationKind, AnimationSpec, Background, Element, ElementKind, Marker,
    MissingContent, Narration, Scene, ShapeKind, SlideDirection,
};
pub use crate::session::navigator::{
    Direction, SceneNavigator, Selection, SkipReason, SkippedScene,
};
pub use crate::session::opts::PreviewOpts;
pub use crate::session::preview::PreviewSession;
pub use crate::transform::viewport::ViewportTransform;
