use crate::{
    assets::frame_set::FrameSet,
    foundation::core::{FrameIndex, Rect, Rgba8Premul, SurfaceSize},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a frame is scaled into the surface when aspect ratios differ.
pub enum FitPolicy {
    /// Scale to fill the surface, cropping the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the surface, letterboxing the remainder.
    Contain,
}

#[derive(Clone, Debug, PartialEq)]
/// A single drawing instruction.
pub enum DrawOp {
    /// Paint the whole surface with a color.
    Fill(Rgba8Premul),
    /// Blit frame `index` scaled into `dest` (device pixels; may extend past the surface).
    Image {
        /// Frame slot to draw.
        index: FrameIndex,
        /// Destination rectangle on the surface.
        dest: Rect,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// Ordered draw instructions for one redraw.
pub struct DrawPlan {
    /// Surface size the plan was computed for.
    pub size: SurfaceSize,
    /// Operations, executed in order.
    pub ops: Vec<DrawOp>,
}

/// Destination rectangle for a `src_w` x `src_h` image centered in `size` under `fit`.
pub fn fit_rect(src_w: u32, src_h: u32, size: SurfaceSize, fit: FitPolicy) -> Rect {
    let (sw, sh) = (f64::from(src_w), f64::from(src_h));
    let (dw, dh) = (f64::from(size.width), f64::from(size.height));
    let (kx, ky) = (dw / sw, dh / sh);
    let scale = match fit {
        FitPolicy::Cover => kx.max(ky),
        FitPolicy::Contain => kx.min(ky),
    };
    let (w, h) = (sw * scale, sh * scale);
    let x = (dw - w) / 2.0;
    let y = (dh - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

/// Plan a redraw of frame `index`: background fill, then the frame if its slot is loaded.
///
/// An empty slot (still pending, or failed) yields a background-only plan.
pub fn plan_frame(
    index: FrameIndex,
    frames: &FrameSet,
    size: SurfaceSize,
    fit: FitPolicy,
    background: Rgba8Premul,
) -> DrawPlan {
    let mut ops = vec![DrawOp::Fill(background)];
    if let Some(img) = frames.get(index)
        && !img.is_empty()
    {
        ops.push(DrawOp::Image {
            index,
            dest: fit_rect(img.width, img.height, size, fit),
        });
    }
    DrawPlan { size, ops }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/plan.rs"]
mod tests;
