use crate::{
    animation::style::AnimationPhase,
    eval::evaluator::ElementRender,
    foundation::core::Rect,
    foundation::math::Fnv1a64,
    scene::model::{Background, ElementKind, ShapeKind},
};

/// 128-bit digest of a frame's visual content.
///
/// Two frames with equal fingerprints draw identically, so a surface can skip the redraw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// High half.
    pub hi: u64,
    /// Low half.
    pub lo: u64,
}

/// Pair of independently seeded hashers written in lockstep.
struct Pair(Fnv1a64, Fnv1a64);

impl Pair {
    fn u8(&mut self, v: u8) {
        self.0.write_u8(v);
        self.1.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.0.write_u64(v);
        self.1.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.0.write_f64(v);
        self.1.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.0.write_str(s);
        self.1.write_str(s);
    }

    fn rgba(&mut self, c: [u8; 4]) {
        for b in c {
            self.u8(b);
        }
    }

    fn rect(&mut self, r: Rect) {
        for v in [r.x0, r.y0, r.x1, r.y1] {
            self.f64(v);
        }
    }
}

pub(crate) fn fingerprint_frame(
    background: Option<&Background>,
    letterbox: Rect,
    elements: &[ElementRender],
) -> FrameFingerprint {
    let mut h = Pair(
        Fnv1a64::new(Fnv1a64::OFFSET_BASIS),
        Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
    );

    match background {
        None => h.u8(0),
        Some(Background::Color { rgba8 }) => {
            h.u8(1);
            h.rgba(*rgba8);
        }
        Some(Background::Image { source }) => {
            h.u8(2);
            h.str(source);
        }
        Some(Background::Video { source }) => {
            h.u8(3);
            h.str(source);
        }
    }
    h.rect(letterbox);

    h.u64(elements.len() as u64);
    for el in elements {
        h.str(&el.element_id);
        write_kind(&mut h, &el.kind);
        h.u64(el.z_index as i64 as u64);
        h.rect(el.rect);
        h.f64(el.rotation_deg);
        match el.font_size {
            Some(size) => {
                h.u8(1);
                h.f64(size);
            }
            None => h.u8(0),
        }
        h.f64(el.opacity);
        h.f64(el.offset.x);
        h.f64(el.offset.y);
        h.u8(u8::from(el.host_smoothing));
        h.u8(match el.phase {
            AnimationPhase::Static => 0,
            AnimationPhase::BeforeEnter => 1,
            AnimationPhase::Entering { .. } => 2,
            AnimationPhase::Shown => 3,
            AnimationPhase::Exiting { .. } => 4,
            AnimationPhase::AfterExit => 5,
        });
    }

    FrameFingerprint {
        hi: h.0.finish(),
        lo: h.1.finish(),
    }
}

fn write_kind(h: &mut Pair, kind: &ElementKind) {
    match kind {
        ElementKind::Text {
            text,
            font_size,
            color_rgba8,
        } => {
            h.u8(0);
            h.str(text);
            h.f64(*font_size);
            h.rgba(*color_rgba8);
        }
        ElementKind::Image { source } => {
            h.u8(1);
            h.str(source);
        }
        ElementKind::Video { source } => {
            h.u8(2);
            h.str(source);
        }
        ElementKind::Shape { shape, fill_rgba8 } => {
            h.u8(3);
            h.u8(match shape {
                ShapeKind::Rectangle => 0,
                ShapeKind::Ellipse => 1,
            });
            h.rgba(*fill_rgba8);
        }
        ElementKind::Avatar { source } => {
            h.u8(4);
            h.str(source);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
