use crate::{
    assets::{decode::PreparedImage, frame_set::FrameSet},
    draw::plan::{DrawOp, DrawPlan},
    foundation::{
        core::{Rect, Rgba8Premul, SurfaceSize},
        error::{ScrollframeError, ScrollframeResult},
    },
};

#[derive(Clone, Debug)]
/// Snapshot of surface pixels.
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied.
    pub premultiplied: bool,
}

/// A drawing target exclusively owned by one player.
pub trait DrawSurface {
    /// Current backing size in device pixels.
    fn size(&self) -> SurfaceSize;

    /// Reallocate the backing store. Contents after a resize are unspecified until redrawn.
    fn resize(&mut self, size: SurfaceSize);

    /// Paint every pixel with `color`.
    fn fill(&mut self, color: Rgba8Premul);

    /// Draw `image` scaled into `dest`, clipped to the surface.
    fn draw_image(&mut self, image: &PreparedImage, dest: Rect);
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn resize(&mut self, size: SurfaceSize) {
        (**self).resize(size)
    }

    fn fill(&mut self, color: Rgba8Premul) {
        (**self).fill(color)
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) {
        (**self).draw_image(image, dest)
    }
}

/// Run `plan` against `surface`, pulling images from `frames`.
///
/// A plan computed for a different surface size is rejected rather than drawn stretched.
pub fn execute_plan<S: DrawSurface + ?Sized>(
    surface: &mut S,
    plan: &DrawPlan,
    frames: &FrameSet,
) -> ScrollframeResult<()> {
    if plan.size != surface.size() {
        return Err(ScrollframeError::render(format!(
            "plan is for {}x{} but surface is {}x{}",
            plan.size.width,
            plan.size.height,
            surface.size().width,
            surface.size().height
        )));
    }

    for op in &plan.ops {
        match op {
            DrawOp::Fill(color) => surface.fill(*color),
            DrawOp::Image { index, dest } => {
                if let Some(img) = frames.get(*index) {
                    surface.draw_image(img, *dest);
                }
            }
        }
    }
    Ok(())
}
