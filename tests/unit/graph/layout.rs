use super::*;

#[test]
fn number_formatting_is_compact() {
    assert_eq!(fmt_num(0.05), "0.05");
    assert_eq!(fmt_num(12.0), "12");
    assert_eq!(fmt_num(0.0), "0");
    assert_eq!(fmt_num(1.0 - 0.07 / 2.0), "0.965");
    assert_eq!(fmt_num(12.5), "12.5");
}

#[test]
fn padding_bounds() {
    assert!(SlateLayout::new(0.0, 24).is_ok());
    assert!(SlateLayout::new(0.49, 24).is_ok());
    assert!(SlateLayout::new(0.5, 24).is_err());
    assert!(SlateLayout::new(-0.1, 24).is_err());
    assert!(SlateLayout::new(f64::NAN, 24).is_err());
    assert!(SlateLayout::new(0.1, 0).is_err());
}

#[test]
fn expressions_match_band_geometry() {
    let l = SlateLayout::new(0.1, 24).unwrap();
    assert_eq!(l.box_y_expr(Band::Top), "0");
    assert_eq!(l.box_y_expr(Band::Bottom), "ih*(1-0.1)");
    assert_eq!(l.box_h_expr(), "ih*0.1");
    assert_eq!(l.text_y_expr(Band::Top), "h*0.05-12");
    assert_eq!(l.text_y_expr(Band::Bottom), "h*0.95-12");
    assert_eq!(l.text_x_expr(HAlign::Left), "10");
    assert_eq!(l.text_x_expr(HAlign::Center), "(w-tw)/2");
    assert_eq!(l.text_x_expr(HAlign::Right), "w-tw");
}

#[test]
fn top_and_bottom_text_mirror_about_the_midpoint() {
    for (padding, font_size) in [(0.0, 10), (0.1, 24), (0.25, 37), (0.45, 80)] {
        let l = SlateLayout::new(padding, font_size).unwrap();
        for height in [480.0, 1080.0, 2160.0] {
            let top = l.text_y(Band::Top, height);
            let bottom = l.text_y(Band::Bottom, height);
            let mirrored = height - (top + f64::from(font_size));
            assert!(
                (bottom - mirrored).abs() < 1e-9,
                "p={padding} f={font_size} h={height}: {bottom} vs {mirrored}"
            );
        }
    }
}

#[test]
fn text_is_centered_in_its_bar() {
    let l = SlateLayout::new(0.1, 20).unwrap();
    let h = 1000.0;
    // Top bar spans [0, 100]; a 20px line centered in it starts at 40.
    assert!((l.box_height(h) - 100.0).abs() < 1e-9);
    assert!((l.text_y(Band::Top, h) - 40.0).abs() < 1e-9);
    assert!((l.text_y(Band::Bottom, h) - 940.0).abs() < 1e-9);
}

#[test]
fn slot_names_and_geometry() {
    for slot in Slot::ALL {
        assert_eq!(slot.name().parse::<Slot>().unwrap(), slot);
    }
    assert_eq!(Slot::TopRight.band(), Band::Top);
    assert_eq!(Slot::BottomCenter.band(), Band::Bottom);
    assert_eq!(Slot::BottomLeft.align(), HAlign::Left);
    assert!("middle".parse::<Slot>().is_err());
}

#[test]
fn assignment_specs() {
    let mut a = SlotAssignment::empty();
    a.apply_spec("bottom_right=timecode&frame").unwrap();
    a.apply_spec("top_left = shot").unwrap();
    assert_eq!(a.get(Slot::BottomRight), Some(ShotField::TimecodeFrame));
    assert_eq!(a.get(Slot::TopLeft), Some(ShotField::Shot));
    assert_eq!(a.len(), 2);

    a.apply_spec("top_left=none").unwrap();
    assert_eq!(a.get(Slot::TopLeft), None);

    assert!(a.apply_spec("top_left").is_err());
    assert!(a.apply_spec("top_left=frames").is_err());
    assert!(a.apply_spec("left=shot").is_err());
}

#[test]
fn assignment_iterates_in_draw_order() {
    let a = SlotAssignment::empty()
        .with(Slot::BottomRight, ShotField::Date)
        .with(Slot::TopLeft, ShotField::Project)
        .with(Slot::BottomLeft, ShotField::Task);
    let order: Vec<Slot> = a.iter().map(|(s, _)| s).collect();
    assert_eq!(order, vec![Slot::TopLeft, Slot::BottomLeft, Slot::BottomRight]);
    assert_eq!(SlotAssignment::standard().len(), 6);
}
