use super::*;
use crate::{assets::decode::PreparedImage, foundation::core::FrameCount};

fn approx(a: Rect, b: Rect) -> bool {
    (a.x0 - b.x0).abs() < 1e-9
        && (a.y0 - b.y0).abs() < 1e-9
        && (a.x1 - b.x1).abs() < 1e-9
        && (a.y1 - b.y1).abs() < 1e-9
}

fn frames_with(index: u32, w: u32, h: u32) -> FrameSet {
    let mut set = FrameSet::new(FrameCount::new(3).unwrap());
    let img = PreparedImage::from_premul(w, h, vec![255; (w * h * 4) as usize]).unwrap();
    assert!(set.insert(FrameIndex(index), img));
    set
}

#[test]
fn cover_crops_wide_image_on_tall_surface() {
    let r = fit_rect(200, 100, SurfaceSize::new(100, 100), FitPolicy::Cover);
    assert!(approx(r, Rect::new(-50.0, 0.0, 150.0, 100.0)));
}

#[test]
fn contain_letterboxes_wide_image_on_tall_surface() {
    let r = fit_rect(200, 100, SurfaceSize::new(100, 100), FitPolicy::Contain);
    assert!(approx(r, Rect::new(0.0, 25.0, 100.0, 75.0)));
}

#[test]
fn matching_aspect_is_identical_under_both_policies() {
    let size = SurfaceSize::new(1920, 1080);
    let cover = fit_rect(1280, 720, size, FitPolicy::Cover);
    let contain = fit_rect(1280, 720, size, FitPolicy::Contain);
    assert!(approx(cover, size.rect()));
    assert!(approx(contain, size.rect()));
}

#[test]
fn cover_always_covers_the_surface() {
    for (w, h) in [(1, 1), (7, 3), (3, 7), (1920, 1080)] {
        for (sw, sh) in [(1, 1), (390, 844), (2560, 1440)] {
            let r = fit_rect(w, h, SurfaceSize::new(sw, sh), FitPolicy::Cover);
            assert!(r.x0 <= 1e-9 && r.y0 <= 1e-9);
            assert!(r.x1 >= f64::from(sw) - 1e-9 && r.y1 >= f64::from(sh) - 1e-9);
        }
    }
}

#[test]
fn plan_fills_background_then_draws_loaded_frame() {
    let bg = Rgba8Premul::from_straight_rgba(5, 5, 5, 255);
    let frames = frames_with(1, 4, 2);
    let size = SurfaceSize::new(8, 8);

    let plan = plan_frame(FrameIndex(1), &frames, size, FitPolicy::Contain, bg);
    assert_eq!(plan.size, size);
    assert_eq!(plan.ops.len(), 2);
    assert_eq!(plan.ops[0], DrawOp::Fill(bg));
    assert!(matches!(plan.ops[1], DrawOp::Image { index: FrameIndex(1), .. }));
}

#[test]
fn plan_for_missing_slot_is_background_only() {
    let bg = Rgba8Premul::from_straight_rgba(250, 250, 249, 255);
    let frames = frames_with(0, 4, 2);
    let plan = plan_frame(
        FrameIndex(2),
        &frames,
        SurfaceSize::new(8, 8),
        FitPolicy::Cover,
        bg,
    );
    assert_eq!(plan.ops, vec![DrawOp::Fill(bg)]);
}
