use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fade(behavior: AnimationBehavior, start: MarkerBound, end: MarkerBound, t: f64) -> AnimationStyle {
    resolve_style(
        AnimationKind::Fade,
        behavior,
        SlideDirection::Up,
        start,
        end,
        t,
        TransitionParams::default(),
    )
}

fn slide(
    direction: SlideDirection,
    start: MarkerBound,
    end: MarkerBound,
    t: f64,
) -> AnimationStyle {
    resolve_style(
        AnimationKind::Slide,
        AnimationBehavior::Both,
        direction,
        start,
        end,
        t,
        TransitionParams::default(),
    )
}

#[test]
fn fade_enter_ramps_over_one_second() {
    let start = MarkerBound::At(Millis(5000));
    let at = |t| fade(AnimationBehavior::Enter, start, MarkerBound::Unbound, t);

    assert_eq!(at(4.9).opacity, 0.0);
    assert_eq!(at(4.9).phase, AnimationPhase::BeforeEnter);
    assert_eq!(at(5.0).opacity, 0.0);
    assert!(at(5.0).is_transitioning);
    assert!(approx(at(5.5).opacity, 0.5));
    assert_eq!(at(6.0).opacity, 1.0);
    assert!(!at(6.0).is_transitioning);
    assert_eq!(at(6.0).phase, AnimationPhase::Shown);
}

#[test]
fn fade_exit_ramps_down_before_end_marker() {
    let end = MarkerBound::At(Millis(10_000));
    let at = |t| fade(AnimationBehavior::Exit, MarkerBound::Unbound, end, t);

    assert_eq!(at(8.5).opacity, 1.0);
    assert_eq!(at(9.0).opacity, 1.0);
    assert!(at(9.0).is_transitioning);
    assert!(approx(at(9.25).opacity, 0.75));
    assert_eq!(at(10.0).opacity, 0.0);
    assert_eq!(at(10.0).phase, AnimationPhase::AfterExit);
    assert!(!at(10.0).is_transitioning);
}

#[test]
fn enter_behavior_ignores_end_marker() {
    let s = fade(
        AnimationBehavior::Enter,
        MarkerBound::At(Millis(1000)),
        MarkerBound::At(Millis(3000)),
        5.0,
    );
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.phase, AnimationPhase::Shown);
}

#[test]
fn exit_behavior_ignores_start_marker() {
    let s = fade(
        AnimationBehavior::Exit,
        MarkerBound::At(Millis(8000)),
        MarkerBound::At(Millis(20_000)),
        1.0,
    );
    assert_eq!(s.opacity, 1.0);
}

#[test]
fn both_behavior_runs_enter_then_exit() {
    let start = MarkerBound::At(Millis(2000));
    let end = MarkerBound::At(Millis(6000));
    let at = |t| fade(AnimationBehavior::Both, start, end, t);
    assert_eq!(at(1.0).opacity, 0.0);
    assert!(approx(at(2.5).opacity, 0.5));
    assert_eq!(at(4.0).opacity, 1.0);
    assert!(approx(at(5.5).opacity, 0.5));
    assert_eq!(at(6.5).opacity, 0.0);
}

#[test]
fn overlapping_windows_let_exit_win() {
    // 400 ms between markers: the exit window opens at 2.4 s, before the entry window ends.
    let start = MarkerBound::At(Millis(3000));
    let end = MarkerBound::At(Millis(3400));
    let s = fade(AnimationBehavior::Both, start, end, 3.2);
    assert!(matches!(s.phase, AnimationPhase::Exiting { .. }));
    assert!(approx(s.opacity, 0.2));

    // Before the start marker the exit window is already active too.
    let s = fade(AnimationBehavior::Both, start, end, 2.9);
    assert!(matches!(s.phase, AnimationPhase::Exiting { .. }));
}

#[test]
fn unresolved_start_marker_stays_before_enter() {
    // Degrades silently: the element never transitions in.
    for t in [0.0, 5.0, 500.0] {
        let s = fade(
            AnimationBehavior::Both,
            MarkerBound::Unresolved,
            MarkerBound::Unbound,
            t,
        );
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.phase, AnimationPhase::BeforeEnter);
    }
    // Exit-only elements are unaffected by an unresolved start.
    let s = fade(
        AnimationBehavior::Exit,
        MarkerBound::Unresolved,
        MarkerBound::Unbound,
        5.0,
    );
    assert_eq!(s.opacity, 1.0);
}

#[test]
fn unresolved_end_marker_never_exits() {
    let s = fade(
        AnimationBehavior::Both,
        MarkerBound::At(Millis(0)),
        MarkerBound::Unresolved,
        1_000.0,
    );
    assert_eq!(s.phase, AnimationPhase::Shown);
}

#[test]
fn none_kind_is_identity() {
    let s = resolve_style(
        AnimationKind::None,
        AnimationBehavior::Both,
        SlideDirection::Left,
        MarkerBound::Unresolved,
        MarkerBound::At(Millis(0)),
        3.0,
        TransitionParams::default(),
    );
    assert_eq!(s, AnimationStyle::IDENTITY);
}

#[test]
fn slide_offsets_follow_direction() {
    let start = MarkerBound::At(Millis(1000));
    let end = MarkerBound::At(Millis(5000));

    let s = slide(SlideDirection::Right, start, end, 0.5);
    assert_eq!(s.offset, Vec2::new(-50.0, 0.0));
    assert_eq!(s.opacity, 0.0);

    let s = slide(SlideDirection::Right, start, end, 1.5);
    assert!(approx(s.offset.x, -25.0));
    assert!(approx(s.opacity, 0.5));

    let s = slide(SlideDirection::Right, start, end, 4.5);
    assert!(approx(s.offset.x, 25.0));

    let s = slide(SlideDirection::Right, start, end, 5.0);
    assert_eq!(s.offset, Vec2::new(50.0, 0.0));

    assert_eq!(slide_entry_offset(SlideDirection::Down, 50.0), Vec2::new(0.0, -50.0));
    assert_eq!(slide_entry_offset(SlideDirection::Left, 50.0), Vec2::new(50.0, 0.0));
    assert_eq!(slide_entry_offset(SlideDirection::Up, 50.0), Vec2::new(0.0, 50.0));

    let s = slide(SlideDirection::Up, start, end, 3.0);
    assert_eq!(s.offset, Vec2::ZERO);
    assert_eq!(s.opacity, 1.0);
}

#[test]
fn fade_never_translates() {
    let s = fade(
        AnimationBehavior::Both,
        MarkerBound::At(Millis(1000)),
        MarkerBound::Unbound,
        1.3,
    );
    assert_eq!(s.offset, Vec2::ZERO);
}

#[test]
fn for_element_looks_up_markers() {
    use crate::markers::resolver::InMemoryMarkerSource;
    use crate::scene::model::Marker;

    let mut src = InMemoryMarkerSource::default();
    src.insert(
        "s",
        vec![Marker {
            id: "in".to_string(),
            timestamp_ms: Some(Millis(5000)),
            description: "intro".to_string(),
        }],
    );
    let mut r = MarkerResolver::new();
    r.load("s", &mut src);

    let spec = AnimationSpec {
        kind: AnimationKind::Fade,
        behavior: AnimationBehavior::Enter,
        direction: SlideDirection::Up,
        start_marker_id: Some("in".to_string()),
        end_marker_id: None,
    };
    let s = AnimationStyle::for_element(&spec, &r, 5.5, TransitionParams::default());
    assert!(approx(s.opacity, 0.5));

    assert_eq!(MarkerBound::lookup(None, &r), MarkerBound::Unbound);
    assert_eq!(MarkerBound::lookup(Some("nope"), &r), MarkerBound::Unresolved);
}
