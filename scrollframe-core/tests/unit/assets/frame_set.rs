use super::*;

fn img(w: u32) -> PreparedImage {
    PreparedImage::from_premul(w, 1, vec![255; w as usize * 4]).unwrap()
}

#[test]
fn slots_fill_independently_in_any_order() {
    let mut set = FrameSet::new(FrameCount::new(4).unwrap());
    assert_eq!(set.len(), 4);
    assert_eq!(set.loaded_count(), 0);

    assert!(set.insert(FrameIndex(3), img(3)));
    assert!(set.insert(FrameIndex(1), img(1)));

    assert_eq!(set.get(FrameIndex(3)).map(|i| i.width), Some(3));
    assert!(set.get(FrameIndex(0)).is_none());
    assert_eq!(set.loaded_count(), 2);
    assert_eq!(
        set.missing().collect::<Vec<_>>(),
        vec![FrameIndex(0), FrameIndex(2)]
    );
}

#[test]
fn out_of_range_insert_is_ignored() {
    let mut set = FrameSet::new(FrameCount::new(2).unwrap());
    assert!(!set.insert(FrameIndex(2), img(1)));
    assert_eq!(set.loaded_count(), 0);
    assert!(set.get(FrameIndex(9)).is_none());
}

#[test]
fn late_insert_replaces_slot() {
    let mut set = FrameSet::new(FrameCount::new(1).unwrap());
    set.insert(FrameIndex(0), img(1));
    set.insert(FrameIndex(0), img(2));
    assert_eq!(set.get(FrameIndex(0)).unwrap().width, 2);
    assert_eq!(set.loaded_count(), 1);
}
