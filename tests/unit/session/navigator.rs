use super::*;
use crate::scene::model::Narration;

fn scene(id: &str, playable: bool) -> Scene {
    Scene {
        id: id.to_string(),
        aspect_ratio: Default::default(),
        background: Default::default(),
        elements: Vec::new(),
        avatar: None,
        script: Some(format!("script {id}")),
        narration: playable.then(|| Narration {
            url: format!("{id}.mp3"),
        }),
        duration_secs: Some(5.0),
    }
}

fn nav(flags: &[bool]) -> SceneNavigator {
    let scenes = flags
        .iter()
        .enumerate()
        .map(|(i, p)| scene(&format!("s{i}"), *p))
        .collect();
    SceneNavigator::new(scenes)
}

#[test]
fn next_skips_unplayable_scenes() {
    let mut n = nav(&[true, false, true]);
    n.select(0).unwrap();
    let sel = n.next().unwrap();
    assert_eq!(sel.index, 2);
    assert_eq!(sel.skipped.len(), 1);
    assert_eq!(sel.skipped[0].scene_id, "s1");
    assert_eq!(
        sel.skipped[0].reason,
        SkipReason::Missing(vec![MissingContent::Narration])
    );
    assert_eq!(n.current().map(|s| s.id.as_str()), Some("s2"));
}

#[test]
fn prev_scans_backward() {
    let mut n = nav(&[true, false, false, true]);
    n.select(3).unwrap();
    let sel = n.prev().unwrap();
    assert_eq!(sel.index, 0);
    assert_eq!(
        sel.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![2, 1]
    );
}

#[test]
fn no_playable_scene_leaves_state_unchanged() {
    let mut n = nav(&[true, false, false]);
    n.select(0).unwrap();
    let err = n.next().unwrap_err();
    assert!(err.to_string().starts_with("navigation error:"));
    assert_eq!(n.current_index(), Some(0));

    let err = n.prev().unwrap_err();
    assert!(matches!(err, PlayerError::Navigation(_)));
    assert_eq!(n.current_index(), Some(0));
}

#[test]
fn select_moves_forward_from_unplayable_start() {
    let mut n = nav(&[false, false, true]);
    let sel = n.select(0).unwrap();
    assert_eq!(sel.index, 2);
    assert!(n.select(7).is_err());
    assert_eq!(n.current_index(), Some(2));
}

#[test]
fn invalid_scenes_are_not_playable() {
    let mut bad = scene("bad", true);
    bad.elements.push(crate::scene::model::Element {
        id: "e".to_string(),
        kind: crate::scene::model::ElementKind::Image {
            source: "a.png".to_string(),
        },
        x: 0.0,
        y: 0.0,
        width: -1.0,
        height: 10.0,
        rotation_deg: 0.0,
        z_index: 0,
        animation: Default::default(),
    });
    assert!(matches!(unplayable_reason(&bad), Some(SkipReason::Invalid(_))));

    let mut n = SceneNavigator::new(vec![bad, scene("ok", true)]);
    let sel = n.select(0).unwrap();
    assert_eq!(sel.index, 1);
    assert!(sel.skipped[0].reason.describe().contains("width"));
}

#[test]
fn stepping_without_active_scene_fails() {
    let mut n = nav(&[true]);
    assert!(n.next().is_err());
    assert!(SceneNavigator::new(Vec::new()).select(0).is_err());
}
