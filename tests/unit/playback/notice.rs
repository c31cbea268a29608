use super::*;

#[test]
fn notices_expire_after_ttl() {
    let mut b = NoticeBoard::new(4000.0);
    b.push(NoticeKind::AudioFailed, "narration blocked");
    b.tick(3999.0);
    assert_eq!(b.active().len(), 1);
    b.tick(1.0);
    assert!(b.active().is_empty());
}

#[test]
fn identical_notice_refreshes_instead_of_stacking() {
    let mut b = NoticeBoard::new(3000.0);
    let a = b.push(NoticeKind::MarkersUnavailable, "markers unavailable");
    b.tick(2000.0);
    let again = b.push(NoticeKind::MarkersUnavailable, "markers unavailable");
    assert_eq!(a, again);
    assert_eq!(b.active().len(), 1);
    assert_eq!(b.active()[0].remaining_ms, 3000.0);

    b.push(NoticeKind::ContentMissing, "scene 'b' skipped");
    assert_eq!(b.active().len(), 2);
}

#[test]
fn dismiss_and_clear() {
    let mut b = NoticeBoard::new(3000.0);
    let id = b.push(NoticeKind::NoPlayableScene, "end of project");
    b.push(NoticeKind::AudioFailed, "x");
    b.dismiss(id);
    assert_eq!(b.active().len(), 1);
    assert_eq!(b.active()[0].kind, NoticeKind::AudioFailed);
    b.clear();
    assert!(b.active().is_empty());
}

#[test]
fn non_positive_ticks_are_ignored() {
    let mut b = NoticeBoard::new(10.0);
    b.push(NoticeKind::AudioFailed, "x");
    b.tick(-50.0);
    b.tick(f64::NAN);
    assert_eq!(b.active()[0].remaining_ms, 10.0);
}
