use super::*;

#[test]
fn aspect_ratio_canvases_match_presets() {
    assert_eq!(AspectRatio::Landscape.canvas().size(), Size::new(1920.0, 1080.0));
    assert_eq!(AspectRatio::Portrait.canvas().size(), Size::new(1080.0, 1920.0));
    assert_eq!(AspectRatio::Square.canvas().size(), Size::new(1080.0, 1080.0));
    assert_eq!(AspectRatio::Classic.canvas().size(), Size::new(1440.0, 1080.0));
}

#[test]
fn aspect_ratio_keywords_roundtrip_through_serde() {
    for ar in [
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Square,
        AspectRatio::Classic,
    ] {
        let json = serde_json::to_string(&ar).unwrap();
        assert_eq!(json, format!("\"{}\"", ar.keyword()));
        assert_eq!(AspectRatio::from_keyword(ar.keyword()).unwrap(), ar);
    }
    assert!(AspectRatio::from_keyword("21:9").is_err());
}

#[test]
fn secs_bucket_floors_and_clamps() {
    assert_eq!(secs_bucket(10.1), 10);
    assert_eq!(secs_bucket(10.9), 10);
    assert_eq!(secs_bucket(11.0), 11);
    assert_eq!(secs_bucket(-0.5), 0);
    assert_eq!(secs_bucket(f64::NAN), 0);
}

#[test]
fn millis_whole_secs_floor() {
    assert_eq!(Millis(4999).whole_secs(), 4);
    assert_eq!(Millis(5000).whole_secs(), 5);
    assert_eq!(Millis(1500).as_secs_f64(), 1.5);
}

#[test]
fn zero_surface_is_unmeasured() {
    assert!(SurfaceSize::default().is_unmeasured());
    assert!(SurfaceSize::new(0.0, 720.0).is_unmeasured());
    assert!(!SurfaceSize::new(1.0, 1.0).is_unmeasured());
}
