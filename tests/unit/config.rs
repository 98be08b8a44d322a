use super::*;

fn config() -> RenderConfig {
    RenderConfig {
        input_path: PathBuf::from("/show/p/a_b_c_v1.%04d.exr"),
        output_path_stem: Some(PathBuf::from("/show/p/a_b_c_v1_slate")),
        output_extension: Some(OutputExtension::Mov),
        font_path: PathBuf::from("/fonts/mono.ttf"),
        font_size: DEFAULT_FONT_SIZE,
        padding_fraction: DEFAULT_PADDING,
        slot_assignment: SlotAssignment::standard(),
        framerate: DEFAULT_FRAMERATE,
    }
}

#[test]
fn output_path_joins_stem_and_extension() {
    let cfg = config();
    assert_eq!(
        cfg.output_path().unwrap(),
        PathBuf::from("/show/p/a_b_c_v1_slate.mov")
    );
    let cfg = cfg.with_extension(OutputExtension::Mp4);
    assert_eq!(
        cfg.output_path().unwrap(),
        PathBuf::from("/show/p/a_b_c_v1_slate.mp4")
    );
}

#[test]
fn unset_output_parts_are_missing_output_path() {
    let mut cfg = config();
    cfg.output_extension = None;
    assert!(matches!(
        cfg.output_path(),
        Err(SlateError::MissingOutputPath(_))
    ));

    let mut cfg = config();
    cfg.output_path_stem = None;
    assert!(matches!(
        cfg.output_path(),
        Err(SlateError::MissingOutputPath(_))
    ));

    let cfg = config().with_output_stem("");
    assert!(matches!(
        cfg.output_path(),
        Err(SlateError::MissingOutputPath(_))
    ));
}

#[test]
fn validation_rejects_out_of_range_values() {
    assert!(config().validate().is_ok());
    assert!(config().with_padding(0.5).validate().is_err());
    assert!(config().with_font_size(0).validate().is_err());
    assert!(config().with_framerate(0).validate().is_err());
}

#[test]
fn extension_parsing() {
    assert_eq!(".mov".parse::<OutputExtension>().unwrap(), OutputExtension::Mov);
    assert_eq!("MP4".parse::<OutputExtension>().unwrap(), OutputExtension::Mp4);
    assert!("avi".parse::<OutputExtension>().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = config();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: RenderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}
