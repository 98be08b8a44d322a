use super::*;

#[test]
fn frame_range_validation() {
    assert!(FrameRange::new(0, 10).is_err());
    assert!(FrameRange::new(20, 10).is_err());

    let r = FrameRange::new(150, 200).unwrap();
    assert_eq!(r.len_frames(), 51);
    assert!(r.contains(150));
    assert!(r.contains(200));
    assert!(!r.contains(201));
    assert_eq!(r.to_string(), "150-200");
}

#[test]
fn video_range_starts_at_1001() {
    let r = FrameRange::for_video(250).unwrap();
    assert_eq!(r.first, 1001);
    assert_eq!(r.last, 1250);
    assert_eq!(r.len_frames(), 250);

    assert!(FrameRange::for_video(0).is_err());
    assert!(FrameRange::for_video(1).unwrap().is_single_frame());
}
