use super::*;

fn text(id: &str) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Text {
            text: "hello".to_string(),
            font_size: 48.0,
            color_rgba8: [255, 255, 255, 255],
        },
        x: 100.0,
        y: 50.0,
        width: 400.0,
        height: 120.0,
        rotation_deg: 0.0,
        z_index: 0,
        animation: AnimationSpec::default(),
    }
}

fn playable(id: &str) -> Scene {
    Scene {
        id: id.to_string(),
        aspect_ratio: AspectRatio::Landscape,
        background: Background::default(),
        elements: vec![text("t0")],
        avatar: None,
        script: Some("Welcome.".to_string()),
        narration: Some(Narration {
            url: format!("https://cdn.example/{id}.mp3"),
        }),
        duration_secs: Some(12.0),
    }
}

#[test]
fn playable_requires_script_duration_and_narration() {
    let s = playable("a");
    assert!(s.is_playable());

    let mut no_audio = playable("b");
    no_audio.narration = None;
    assert_eq!(no_audio.missing_content(), vec![MissingContent::Narration]);

    let mut blank_script = playable("c");
    blank_script.script = Some("   ".to_string());
    blank_script.duration_secs = None;
    assert_eq!(
        blank_script.missing_content(),
        vec![MissingContent::Script, MissingContent::Duration]
    );
    assert!(!blank_script.is_playable());
}

#[test]
fn validate_rejects_duplicate_ids_and_bad_geometry() {
    let mut s = playable("a");
    assert!(s.validate().is_ok());

    s.avatar = Some(text("t0"));
    let err = s.validate().unwrap_err().to_string();
    assert!(err.contains("duplicate element id 't0'"));

    let mut s = playable("a");
    s.elements[0].width = -1.0;
    assert!(s.validate().is_err());

    let mut s = playable("a");
    s.duration_secs = Some(f64::NAN);
    assert!(s.validate().is_err());
}

#[test]
fn referenced_marker_ids_include_avatar() {
    let mut s = playable("a");
    s.elements[0].animation.start_marker_id = Some("m1".to_string());
    let mut avatar = text("avatar");
    avatar.animation.end_marker_id = Some("m2".to_string());
    s.avatar = Some(avatar);

    let ids: Vec<&str> = s.referenced_marker_ids().into_iter().collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    assert_eq!(s.visual_elements().last().unwrap().id, "avatar");
}

#[test]
fn scene_json_defaults_apply() {
    let s: Scene = serde_json::from_str(
        r#"{
            "id": "s1",
            "aspect_ratio": "9:16",
            "elements": [{
                "id": "box",
                "kind": { "type": "shape", "shape": "ellipse", "fill_rgba8": [255, 0, 0, 255] },
                "x": 0, "y": 0, "width": 10, "height": 10,
                "animation": { "kind": "slide", "direction": "right", "start_marker_id": "m" }
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(s.canvas(), Canvas { width: 1080, height: 1920 });
    assert_eq!(s.background, Background::default());
    let anim = &s.elements[0].animation;
    assert_eq!(anim.kind, AnimationKind::Slide);
    assert_eq!(anim.behavior, AnimationBehavior::Both);
    assert_eq!(anim.direction, SlideDirection::Right);
    assert!(!s.is_playable());
}

#[test]
fn behavior_edges() {
    assert!(AnimationBehavior::Enter.has_enter());
    assert!(!AnimationBehavior::Enter.has_exit());
    assert!(!AnimationBehavior::Exit.has_enter());
    assert!(AnimationBehavior::Both.has_enter() && AnimationBehavior::Both.has_exit());
}
