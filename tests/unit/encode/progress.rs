use super::*;

#[test]
fn frame_marker_parsing() {
    assert_eq!(parse_frame_marker("frame=   75"), Some(75));
    assert_eq!(
        parse_frame_marker("frame=  150 fps= 30 q=28.0 size=    1024kB time=00:00:05.00"),
        Some(150)
    );
    assert_eq!(parse_frame_marker("frame=12"), Some(12));
    assert_eq!(parse_frame_marker("frame="), None);
    assert_eq!(parse_frame_marker("frame=abc"), None);
    assert_eq!(parse_frame_marker("  frame=10"), None);
    assert_eq!(parse_frame_marker("Stream #0:0: Video: prores"), None);
}

#[test]
fn percent_uses_floor_of_range_length() {
    let range = FrameRange::new(1001, 1250).unwrap();
    assert_eq!(percent_for_frame(75, range), 30);
    assert_eq!(percent_for_frame(0, range), 0);
    assert_eq!(percent_for_frame(249, range), 99);
    assert_eq!(percent_for_frame(250, range), 100);
    assert_eq!(percent_for_frame(400, range), 100);
}

#[test]
fn single_frame_range_is_immediately_complete() {
    let range = FrameRange::new(1001, 1001).unwrap();
    assert_eq!(percent_for_frame(0, range), 100);
    assert_eq!(percent_for_frame(1, range), 100);
}

#[test]
fn tracker_never_goes_backwards() {
    let mut t = ProgressTracker::new(FrameRange::new(1, 100).unwrap());
    assert_eq!(t.observe_line("frame=10"), Some(10));
    assert_eq!(t.observe_line("noise"), None);
    assert_eq!(t.observe_line("frame=5"), Some(10));
    assert_eq!(t.observe_line("frame=10"), Some(10));
    assert_eq!(t.observe_line("frame=60"), Some(60));
    assert_eq!(t.last(), Some(60));

    assert!(t.finish());
    assert_eq!(t.last(), Some(100));
    assert!(!t.finish());
}

#[test]
fn splitter_handles_carriage_returns_and_partial_chunks() {
    let mut s = LineSplitter::default();
    assert!(s.push(b"Input #0, image2").is_empty());
    assert_eq!(s.push(b", from 'x':\nframe=   1 fps=0\rfr"), vec![
        "Input #0, image2, from 'x':".to_string(),
        "frame=   1 fps=0".to_string(),
    ]);
    assert_eq!(s.push(b"ame=   2\r\n"), vec!["frame=   2".to_string()]);
    assert_eq!(s.push(b"tail"), Vec::<String>::new());
    assert_eq!(s.finish(), Some("tail".to_string()));
    assert_eq!(s.finish(), None);
}

#[test]
fn tail_keeps_most_recent_lines() {
    let mut tail = OutputTail::new(2);
    tail.push("a");
    tail.push("b");
    tail.push("c");
    assert_eq!(tail.joined(), "b\nc");

    let mut none = OutputTail::new(0);
    none.push("a");
    assert_eq!(none.joined(), "");
}
