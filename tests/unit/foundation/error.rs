use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlateError::invalid_path("x")
            .to_string()
            .contains("invalid input path:")
    );
    assert!(
        SlateError::empty_sequence("x")
            .to_string()
            .contains("empty sequence:")
    );
    assert!(
        SlateError::missing_output_path("x")
            .to_string()
            .contains("missing output path:")
    );
    assert!(
        SlateError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlateError::probe("x").to_string().contains("probe error:"));
    assert!(SlateError::spawn("x").to_string().contains("spawn error:"));
    assert!(
        SlateError::render_failure("x")
            .to_string()
            .contains("render failed:")
    );
    assert!(
        SlateError::cancelled("x")
            .to_string()
            .contains("render cancelled:")
    );
    assert!(
        SlateError::render_in_progress("x")
            .to_string()
            .contains("render in progress:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
