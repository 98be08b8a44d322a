use super::*;
use crate::foundation::core::FrameRange;
use crate::shot::metadata::ShotName;

fn metadata() -> ShotMetadata {
    ShotMetadata::new(
        "insideout2",
        &ShotName::parse("CYR_0100_comp_v003").unwrap(),
        FrameRange::new(150, 200).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    )
}

fn builder() -> FilterGraphBuilder {
    FilterGraphBuilder::new(
        SlateLayout::new(0.1, 24).unwrap(),
        "/fonts/Courier Prime.ttf",
        150,
    )
}

#[test]
fn renders_expected_chain() {
    let slots = SlotAssignment::empty()
        .with(Slot::BottomRight, ShotField::TimecodeFrame)
        .with(Slot::TopLeft, ShotField::Shot);
    let graph = builder().build(&slots, &metadata());

    let expected = [
        "drawbox=x=0:y=0:w=iw:h=ih*0.1:color=black:t=fill",
        "drawbox=x=0:y=ih*(1-0.1):w=iw:h=ih*0.1:color=black:t=fill",
        "drawtext=fontfile=/fonts/Courier Prime.ttf:text=CYR_0100:start_number=150:x=10:y=h*0.05-12:fontcolor=white@0.7:fontsize=24",
        "drawtext=fontfile=/fonts/Courier Prime.ttf:text=%{n}/150-200:start_number=150:x=w-tw:y=h*0.95-12:fontcolor=white@0.7:fontsize=24",
    ]
    .join(",");
    assert_eq!(graph.render(), expected);
    assert_eq!(graph.to_string(), expected);
    assert!(!graph.render().ends_with(','));
}

#[test]
fn directive_counts_follow_assignment() {
    let md = metadata();

    let empty = builder().build(&SlotAssignment::empty(), &md);
    assert_eq!(empty.directives().len(), 2);
    assert_eq!(empty.text_count(), 0);
    assert_eq!(empty.render().matches("drawbox=").count(), 2);
    assert_eq!(empty.render().matches("drawtext=").count(), 0);

    let full = builder().build(&SlotAssignment::standard(), &md);
    assert_eq!(full.text_count(), 6);
    assert_eq!(full.render().matches("drawbox=").count(), 2);
    assert_eq!(full.render().matches("drawtext=").count(), 6);
}

#[test]
fn padding_boxes_come_first_then_corners_in_order() {
    let graph = builder().build(&SlotAssignment::standard(), &metadata());
    let d = graph.directives();

    assert!(matches!(d[0], FilterDirective::PaddingBox { band: Band::Top, .. }));
    assert!(matches!(d[1], FilterDirective::PaddingBox { band: Band::Bottom, .. }));

    let slots: Vec<Slot> = d[2..]
        .iter()
        .map(|dir| match dir {
            FilterDirective::Text { slot, .. } => *slot,
            other => panic!("unexpected directive {other:?}"),
        })
        .collect();
    assert_eq!(slots, Slot::ALL.to_vec());
}

#[test]
fn text_values_come_from_metadata() {
    let graph = builder().build(&SlotAssignment::standard(), &metadata());
    let texts: Vec<(ShotField, &str)> = graph
        .directives()
        .iter()
        .filter_map(|d| match d {
            FilterDirective::Text { field, text, .. } => Some((*field, text.as_str())),
            FilterDirective::PaddingBox { .. } => None,
        })
        .collect();
    assert_eq!(texts[0], (ShotField::Project, "INSIDEOUT2"));
    assert_eq!(texts[5], (ShotField::TimecodeFrame, "%{n}/150-200"));
}

#[test]
fn quotes_and_separators_in_paths_are_escaped() {
    let b = FilterGraphBuilder::new(
        SlateLayout::new(0.1, 24).unwrap(),
        "/fonts/it's,odd:font.ttf",
        1,
    );
    let slots = SlotAssignment::empty().with(Slot::TopLeft, ShotField::Project);
    let rendered = b.build(&slots, &metadata()).render();

    // Only the two top-level separators remain unescaped.
    let bare_commas = rendered
        .char_indices()
        .filter(|(i, c)| *c == ',' && !rendered[..*i].ends_with('\\'))
        .count();
    assert_eq!(bare_commas, 2);
    assert!(rendered.contains(r"fontfile=/fonts/it\\\'s\,odd\\:font.ttf"));
}
