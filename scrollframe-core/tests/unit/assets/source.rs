use super::*;

#[test]
fn list_wraps_modulo_length() {
    let list = FrameList::new(vec!["/images/a.jpg".into(), "/images/b.jpg".into()]).unwrap();
    assert_eq!(list.frame_url(FrameIndex(0)), "/images/a.jpg");
    assert_eq!(list.frame_url(FrameIndex(1)), "/images/b.jpg");
    assert_eq!(list.frame_url(FrameIndex(2)), "/images/a.jpg");
    assert_eq!(list.len(), 2);
}

#[test]
fn list_rejects_empty_and_blank() {
    assert!(FrameList::new(vec![]).is_err());
    assert!(FrameList::new(vec!["a.jpg".into(), "  ".into()]).is_err());
}

#[test]
fn pattern_one_based_and_padded() {
    let p = FramePattern::parse("/images/so{n}.jpg").unwrap();
    assert_eq!(p.frame_url(FrameIndex(0)), "/images/so1.jpg");
    assert_eq!(p.frame_url(FrameIndex(6)), "/images/so7.jpg");

    let p = FramePattern::parse("seq/{index:03}.png").unwrap();
    assert_eq!(p.frame_url(FrameIndex(7)), "seq/007.png");
    assert_eq!(p.frame_url(FrameIndex(1234)), "seq/1234.png");
}

#[test]
fn pattern_rejects_bad_templates() {
    assert!(FramePattern::parse("static.jpg").is_err());
    assert!(FramePattern::parse("a{index.jpg").is_err());
    assert!(FramePattern::parse("a{frame}.jpg").is_err());
    assert!(FramePattern::parse("a{index:x}.jpg").is_err());
    assert!(FramePattern::parse("a{index:}.jpg").is_err());
    assert!(FramePattern::parse("a{index:+3}.jpg").is_err());
}

#[test]
fn pattern_pad_width_is_bounded() {
    let widest = FramePattern::parse("f{index:032}.png").unwrap();
    assert_eq!(widest.frame_url(FrameIndex(1)).len(), "f.png".len() + MAX_PAD_WIDTH);

    for template in ["f{index:33}.png", "f{n:65536}.png", "f{index:4294967296}.png"] {
        let err = FramePattern::parse(template).unwrap_err();
        assert!(matches!(err, ScrollframeError::Validation(_)), "{template}: {err}");
    }
    // Overflowing usize is a bad width too, not a panic.
    assert!(FramePattern::parse("f{index:99999999999999999999999}.png").is_err());
}

#[test]
fn closures_are_sources_and_resolution_is_pure() {
    let src = |i: FrameIndex| format!("page/faculty/{}.jpg", i.0);
    assert_eq!(src.frame_url(FrameIndex(3)), src.frame_url(FrameIndex(3)));
    assert_eq!(src.frame_url(FrameIndex(3)), "page/faculty/3.jpg");
}

#[test]
fn spec_deserializes_list_and_pattern() {
    let list: FrameSourceSpec = serde_json::from_str(r#"{"list":["a.png","b.png"]}"#).unwrap();
    assert_eq!(list.frame_url(FrameIndex(1)), "b.png");

    let pat: FrameSourceSpec = serde_json::from_str(r#"{"pattern":"f{n:02}.png"}"#).unwrap();
    assert_eq!(pat.frame_url(FrameIndex(0)), "f01.png");

    assert!(serde_json::from_str::<FrameSourceSpec>(r#"{"pattern":"nope.png"}"#).is_err());
}
