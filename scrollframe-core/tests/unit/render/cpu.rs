use super::*;
use crate::{
    assets::frame_set::FrameSet,
    draw::plan::{FitPolicy, plan_frame},
    foundation::core::{FrameCount, FrameIndex},
    render::surface::execute_plan,
};

const BG: [u8; 4] = [5, 5, 5, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn bg() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(BG[0], BG[1], BG[2], BG[3])
}

fn single_frame(img: PreparedImage) -> FrameSet {
    let mut set = FrameSet::new(FrameCount::new(1).unwrap());
    set.insert(FrameIndex(0), img);
    set
}

#[test]
fn fill_paints_every_pixel() {
    let mut s = CpuSurface::new(SurfaceSize::new(3, 2));
    s.fill(bg());
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(s.pixel(x, y), Some(BG));
        }
    }
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn contain_leaves_letterbox_in_background_color() {
    let frames = single_frame(solid(4, 2, RED));
    let size = SurfaceSize::new(4, 4);
    let mut s = CpuSurface::new(size);
    let plan = plan_frame(FrameIndex(0), &frames, size, FitPolicy::Contain, bg());
    execute_plan(&mut s, &plan, &frames).unwrap();

    for x in 0..4 {
        assert_eq!(s.pixel(x, 0), Some(BG));
        assert_eq!(s.pixel(x, 1), Some(RED));
        assert_eq!(s.pixel(x, 2), Some(RED));
        assert_eq!(s.pixel(x, 3), Some(BG));
    }
}

#[test]
fn cover_fills_the_whole_surface() {
    let frames = single_frame(solid(4, 2, RED));
    let size = SurfaceSize::new(4, 4);
    let mut s = CpuSurface::new(size);
    let plan = plan_frame(FrameIndex(0), &frames, size, FitPolicy::Cover, bg());
    execute_plan(&mut s, &plan, &frames).unwrap();

    let snap = s.snapshot();
    assert!(snap.premultiplied);
    assert!(snap.data.chunks_exact(4).all(|px| px == RED));
}

#[test]
fn cover_crops_to_the_center_of_the_source() {
    // Left half green, right half blue; a square surface keeps the middle two columns.
    let g = [0u8, 255, 0, 255];
    let b = [0u8, 0, 255, 255];
    let mut px = Vec::new();
    for _ in 0..2 {
        px.extend_from_slice(&[g, g, b, b].concat());
    }
    let frames = single_frame(PreparedImage::from_premul(4, 2, px).unwrap());
    let size = SurfaceSize::new(2, 2);
    let mut s = CpuSurface::new(size);
    let plan = plan_frame(FrameIndex(0), &frames, size, FitPolicy::Cover, bg());
    execute_plan(&mut s, &plan, &frames).unwrap();

    assert_eq!(s.pixel(0, 0), Some(g));
    assert_eq!(s.pixel(1, 0), Some(b));
}

#[test]
fn draws_at_one_by_one_and_large_sizes() {
    let frames = single_frame(solid(3, 5, RED));
    for (w, h) in [(1, 1), (1920, 1080)] {
        let size = SurfaceSize::new(w, h);
        let mut s = CpuSurface::new(size);
        let plan = plan_frame(FrameIndex(0), &frames, size, FitPolicy::Cover, bg());
        execute_plan(&mut s, &plan, &frames).unwrap();
        assert_eq!(s.pixel(w / 2, h / 2), Some(RED));
    }
}

#[test]
fn plan_for_stale_size_is_rejected() {
    let frames = single_frame(solid(2, 2, RED));
    let plan = plan_frame(
        FrameIndex(0),
        &frames,
        SurfaceSize::new(4, 4),
        FitPolicy::Cover,
        bg(),
    );
    let mut s = CpuSurface::new(SurfaceSize::new(8, 8));
    assert!(execute_plan(&mut s, &plan, &frames).is_err());
}

#[test]
fn resize_reallocates_backing_store() {
    let mut s = CpuSurface::new(SurfaceSize::new(2, 2));
    s.resize(SurfaceSize::new(5, 3));
    assert_eq!(s.size(), SurfaceSize::new(5, 3));
    assert_eq!(s.snapshot().data.len(), 5 * 3 * 4);
}
