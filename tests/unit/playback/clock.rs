use super::*;
use crate::scene::model::Narration;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn scene(duration: Option<f64>) -> Scene {
    Scene {
        id: "s".to_string(),
        aspect_ratio: Default::default(),
        background: Default::default(),
        elements: vec![],
        avatar: None,
        script: Some("x".to_string()),
        narration: Some(Narration {
            url: "n.mp3".to_string(),
        }),
        duration_secs: duration,
    }
}

#[test]
fn duration_prefers_scene_then_narration_then_default() {
    assert_eq!(resolve_duration(&scene(Some(12.0)), Some(30.0), 10.0), 12.0);
    assert_eq!(resolve_duration(&scene(None), Some(30.0), 10.0), 30.0);
    assert_eq!(resolve_duration(&scene(None), None, 10.0), 10.0);
    assert_eq!(resolve_duration(&scene(Some(0.0)), Some(f64::NAN), 10.0), 10.0);
}

#[test]
fn stopped_clock_ignores_time() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(5.0);
    assert_eq!(c.advance(500.0), ClockEvent::Idle);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn commits_are_batched_to_frame_interval() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(5.0);
    assert!(c.play());

    // Jittery 4 ms callbacks only commit once a full frame has accumulated.
    let mut advanced = 0;
    for _ in 0..10 {
        if c.advance(4.0) == ClockEvent::Advanced {
            advanced += 1;
        }
    }
    assert_eq!(advanced, 2);
    assert_eq!(c.commits(), 2);
    assert!((c.current_time() - 0.040).abs() < 1e-9);
}

#[test]
fn reaching_duration_stops_exactly_once() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(1.0);
    c.play();

    let mut ended = 0;
    for _ in 0..200 {
        if c.advance(10.0) == ClockEvent::Ended {
            ended += 1;
        }
        let p = c.playhead();
        assert!(p.current_time >= 0.0 && p.current_time <= p.duration);
    }
    assert_eq!(ended, 1);
    assert!(!c.is_playing());
    assert_eq!(c.current_time(), 1.0);
    assert_eq!(c.playhead().progress(), 1.0);
}

#[test]
fn partial_frame_commits_when_scene_is_about_to_end() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(1.0);
    c.seek_secs(0.998);
    c.play();
    // 3 ms is less than a frame but crosses the end.
    assert_eq!(c.advance(3.0), ClockEvent::Ended);
    assert_eq!(c.current_time(), 1.0);
}

#[test]
fn play_at_end_rewinds() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(2.0);
    c.seek_fraction(1.0);
    assert!(c.play());
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn zero_duration_cannot_play() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(0.0);
    assert!(!c.play());
    assert!(!c.toggle());
}

#[test]
fn seek_is_synchronous_and_clamped() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(8.0);
    assert_eq!(c.seek_fraction(0.25), 2.0);
    assert_eq!(c.current_time(), 2.0);
    assert_eq!(c.seek_fraction(7.0), 8.0);
    assert_eq!(c.seek_fraction(f64::NAN), 0.0);
    assert_eq!(c.seek_secs(-3.0), 0.0);
}

#[test]
fn frame_delta_starts_at_zero_after_play() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(8.0);
    c.play();
    assert_eq!(c.frame_delta(1000.0), 0.0);
    assert_eq!(c.frame_delta(1016.0), 16.0);
    c.pause();
    c.play();
    assert_eq!(c.frame_delta(9000.0), 0.0);
}

#[test]
fn fixed_step_scheduler_only_ticks_while_running() {
    let mut s = FixedStepScheduler::new(20.0);
    assert_eq!(s.next_frame(), None);
    s.start();
    assert_eq!(s.next_frame(), Some(20.0));
    assert_eq!(s.next_frame(), Some(40.0));
    s.stop();
    assert!(!s.is_running());
    assert_eq!(s.next_frame(), None);
    assert_eq!(s.transitions(), (1, 1));
    assert_eq!(s.now_ms(), 40.0);
}

#[test]
fn timecode_formats_minutes_and_seconds() {
    assert_eq!(format_timecode(0.0), "0:00");
    assert_eq!(format_timecode(65.9), "1:05");
    assert_eq!(format_timecode(-4.0), "0:00");
}

#[test]
fn reset_clears_position_and_state() {
    let mut c = PlaybackClock::new(FRAME_MS);
    c.reset(4.0);
    c.play();
    c.advance(500.0);
    c.reset(6.0);
    let p = c.playhead();
    assert_eq!(p, Playhead { current_time: 0.0, is_playing: false, duration: 6.0 });
    assert_eq!(p.remaining(), 6.0);
}
