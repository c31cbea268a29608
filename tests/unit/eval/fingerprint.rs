use super::*;
use crate::foundation::core::Vec2;

fn render(opacity: f64) -> ElementRender {
    ElementRender {
        element_id: "t0".to_string(),
        kind: ElementKind::Text {
            text: "hello".to_string(),
            font_size: 48.0,
            color_rgba8: [255, 255, 255, 255],
        },
        z_index: 0,
        rect: Rect::new(10.0, 10.0, 110.0, 60.0),
        rotation_deg: 0.0,
        font_size: Some(24.0),
        opacity,
        offset: Vec2::ZERO,
        host_smoothing: true,
        phase: AnimationPhase::Shown,
    }
}

#[test]
fn fingerprint_is_deterministic() {
    let bg = Background::default();
    let lb = Rect::new(0.0, 0.0, 960.0, 540.0);
    let els = vec![render(1.0)];
    assert_eq!(
        fingerprint_frame(Some(&bg), lb, &els),
        fingerprint_frame(Some(&bg), lb, &els)
    );
}

#[test]
fn fingerprint_changes_with_visual_content() {
    let bg = Background::default();
    let lb = Rect::new(0.0, 0.0, 960.0, 540.0);
    let a = fingerprint_frame(Some(&bg), lb, &[render(1.0)]);
    let b = fingerprint_frame(Some(&bg), lb, &[render(0.5)]);
    let c = fingerprint_frame(Some(&bg), Rect::new(0.0, 0.0, 480.0, 270.0), &[render(1.0)]);
    let d = fingerprint_frame(None, lb, &[render(1.0)]);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}
