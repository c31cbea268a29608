use crate::{
    animation::style::{AnimationPhase, AnimationStyle, TransitionParams},
    eval::fingerprint::{FrameFingerprint, fingerprint_frame},
    eval::visibility::VisibilityCache,
    foundation::core::{Rect, SurfaceSize, Vec2},
    markers::resolver::{MarkerResolver, MarkerStatus},
    playback::clock::Playhead,
    playback::notice::Notice,
    scene::model::{Background, Element, ElementKind, Scene},
    transform::viewport::ViewportTransform,
};

#[derive(Clone, Debug, serde::Serialize)]
/// Everything a stateless surface needs to draw one frame.
pub struct RenderDescription {
    /// Active scene, `None` when the preview is closed.
    pub scene_id: Option<String>,
    /// Play-head state at this frame.
    pub playhead: Playhead,
    /// Surface the geometry was computed for.
    pub surface: SurfaceSize,
    /// Canonical → surface scale.
    pub scale: f64,
    /// Surface area covered by the canvas.
    pub letterbox: Rect,
    /// Scene background.
    pub background: Option<Background>,
    /// Visible elements in painter's order.
    pub elements: Vec<ElementRender>,
    /// Marker load state ("no markers yet" while pending).
    pub markers: MarkerStatus,
    /// Active transient notices.
    pub notices: Vec<Notice>,
    /// Narration volume in `0..=100`.
    pub volume: u8,
    /// Narration mute state.
    pub muted: bool,
    /// Fullscreen requested.
    pub fullscreen: bool,
    /// Digest of the visual content (background, letterbox, elements).
    pub fingerprint: FrameFingerprint,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One visible element resolved for the current frame.
pub struct ElementRender {
    /// Element identifier.
    pub element_id: String,
    /// Element content.
    pub kind: ElementKind,
    /// Painter's order key.
    pub z_index: i32,
    /// Surface-space rectangle before the animation offset.
    pub rect: Rect,
    /// Rotation in degrees around the rect center.
    pub rotation_deg: f64,
    /// Surface-space font size for text elements.
    pub font_size: Option<f64>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Surface-space animation offset.
    pub offset: Vec2,
    /// Whether the host may apply its own interpolation (off while transitioning).
    pub host_smoothing: bool,
    /// Animation lifecycle phase.
    pub phase: AnimationPhase,
}

/// Stateless per-frame composition of a scene.
pub struct Evaluator;

impl Evaluator {
    /// Resolve every visible element of `scene` at `t_secs`.
    ///
    /// Elements are sorted by `(z_index, authoring order)`; the avatar counts as authored last.
    pub fn eval_elements(
        scene: &Scene,
        t_secs: f64,
        viewport: &ViewportTransform,
        markers: &MarkerResolver,
        visibility: &mut VisibilityCache,
        params: TransitionParams,
    ) -> Vec<ElementRender> {
        let mut keyed: Vec<((i32, usize), ElementRender)> = Vec::with_capacity(
            scene.elements.len() + usize::from(scene.avatar.is_some()),
        );

        for (order, el) in scene.visual_elements().enumerate() {
            let anim = &el.animation;
            if !visibility.is_visible(
                anim.start_marker_id.as_deref(),
                anim.end_marker_id.as_deref(),
                anim.behavior,
                t_secs,
                markers,
            ) {
                continue;
            }
            let style = AnimationStyle::for_element(anim, markers, t_secs, params);
            keyed.push(((el.z_index, order), eval_element(el, &style, viewport)));
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, r)| r).collect()
    }

    /// Fingerprint of the visual part of a frame.
    pub fn fingerprint(
        background: Option<&Background>,
        viewport: &ViewportTransform,
        elements: &[ElementRender],
    ) -> FrameFingerprint {
        fingerprint_frame(background, viewport.letterbox(), elements)
    }
}

fn eval_element(el: &Element, style: &AnimationStyle, viewport: &ViewportTransform) -> ElementRender {
    let font_size = match &el.kind {
        ElementKind::Text { font_size, .. } => Some(viewport.to_surface_font(*font_size)),
        _ => None,
    };
    ElementRender {
        element_id: el.id.clone(),
        kind: el.kind.clone(),
        z_index: el.z_index,
        rect: viewport.to_surface_rect(el.rect()),
        rotation_deg: el.rotation_deg,
        font_size,
        opacity: style.opacity.clamp(0.0, 1.0),
        offset: viewport.to_surface_vec(style.offset),
        host_smoothing: !style.is_transitioning,
        phase: style.phase,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
