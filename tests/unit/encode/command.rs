use super::*;
use crate::config::{OutputExtension, RenderConfig};
use crate::graph::layout::{Slot, SlotAssignment};
use crate::shot::metadata::{ShotField, ShotName};

fn metadata(range: FrameRange) -> ShotMetadata {
    ShotMetadata::new(
        "insideout2",
        &ShotName::parse("CYR_0100_comp_v003").unwrap(),
        range,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    )
}

fn config(input: &str) -> RenderConfig {
    RenderConfig {
        input_path: PathBuf::from(input),
        output_path_stem: Some(PathBuf::from("/show/p/out/CYR_0100_comp_v003_slate")),
        output_extension: Some(OutputExtension::Mov),
        font_path: PathBuf::from("/usr/share/fonts/Courier_Prime/CourierPrime-Regular.ttf"),
        font_size: 24,
        padding_fraction: 0.1,
        slot_assignment: SlotAssignment::empty().with(Slot::TopLeft, ShotField::Shot),
        framerate: 24,
    }
}

#[test]
fn sequence_command_declares_rate_and_start_number() {
    let range = FrameRange::new(150, 200).unwrap();
    let cmd = CommandAssembler::default()
        .assemble(
            &config("/show/p/CYR_0100_comp_v003.%04d.exr"),
            InputKind::Sequence,
            range,
            &metadata(range),
        )
        .unwrap();

    assert_eq!(cmd.program(), Path::new("ffmpeg"));
    let args = cmd.args();
    assert_eq!(
        &args[..6],
        &[
            "-framerate",
            "24",
            "-start_number",
            "150",
            "-i",
            "/show/p/CYR_0100_comp_v003.%04d.exr"
        ]
    );
    assert_eq!(args[6], "-vf");
    assert!(args[7].starts_with("drawbox="));
    assert!(args[7].contains("start_number=150"));
    assert_eq!(
        &args[8..],
        &[
            "-c:v",
            "prores_ks",
            "/show/p/out/CYR_0100_comp_v003_slate.mov",
            "-y"
        ]
    );
}

#[test]
fn video_command_has_no_extra_input_flags() {
    let range = FrameRange::for_video(250).unwrap();
    let cmd = CommandAssembler::new("/opt/ffmpeg/bin/ffmpeg")
        .assemble(
            &config("/show/p/CYR_0100_comp_v003.mov").with_extension(OutputExtension::Mp4),
            InputKind::Video,
            range,
            &metadata(range),
        )
        .unwrap();

    assert_eq!(cmd.args()[0], "-i");
    assert_eq!(cmd.arg_after("-i"), Some("/show/p/CYR_0100_comp_v003.mov"));
    assert_eq!(cmd.arg_after("-framerate"), None);
    assert_eq!(cmd.arg_after("-start_number"), None);
    assert_eq!(cmd.arg_after("-c:v"), Some("prores_ks"));
    assert!(cmd.args().contains(&"/show/p/out/CYR_0100_comp_v003_slate.mp4".to_string()));
    assert!(cmd.arg_after("-vf").unwrap().contains("start_number=1001"));
}

#[test]
fn missing_output_fails_before_anything_else() {
    let range = FrameRange::new(1, 10).unwrap();
    let mut cfg = config("/show/p/in.%04d.png");
    cfg.output_extension = None;
    // Also invalid, but the output check comes first.
    cfg.padding_fraction = 0.9;

    let err = CommandAssembler::default()
        .assemble(&cfg, InputKind::Sequence, range, &metadata(range))
        .unwrap_err();
    assert!(matches!(err, SlateError::MissingOutputPath(_)));
}

#[test]
fn invalid_padding_is_rejected() {
    let range = FrameRange::new(1, 10).unwrap();
    let cfg = config("/show/p/in.%04d.png").with_padding(0.5);
    let err = CommandAssembler::default()
        .assemble(&cfg, InputKind::Sequence, range, &metadata(range))
        .unwrap_err();
    assert!(matches!(err, SlateError::Validation(_)));
}

#[test]
fn shell_rendering_quotes_the_filter_graph() {
    let cmd = SlateCommand::new("ffmpeg", ["-i", "/tmp/a b.mov", "-vf", "drawtext=text=x:y=h*0.1-12"]);
    assert_eq!(
        cmd.to_shell_string(),
        "ffmpeg -i '/tmp/a b.mov' -vf 'drawtext=text=x:y=h*0.1-12'"
    );
    assert_eq!(cmd.to_string(), cmd.to_shell_string());
}
