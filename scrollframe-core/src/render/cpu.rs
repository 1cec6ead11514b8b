use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::{Rect, Rgba8Premul, SurfaceSize},
        math::src_over_px,
    },
    render::surface::{DrawSurface, FrameRGBA},
};

#[derive(Clone, Debug)]
/// In-memory premultiplied RGBA8 surface.
pub struct CpuSurface {
    size: SurfaceSize,
    data: Vec<u8>,
}

impl CpuSurface {
    /// Transparent surface of `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            data: vec![0; size.area() * 4],
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy out the current pixels.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }
}

/// Half-open device-pixel span whose pixel centers fall inside `[lo, hi)`, clipped to `[0, max)`.
fn pixel_span(lo: f64, hi: f64, max: u32) -> (u32, u32) {
    let start = (lo - 0.5).ceil().max(0.0);
    let end = (hi - 0.5).ceil().min(f64::from(max));
    if end <= start {
        return (0, 0);
    }
    (start as u32, end as u32)
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.data.clear();
        self.data.resize(size.area() * 4, 0);
    }

    fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        self.data
            .par_chunks_mut(4)
            .for_each(|dst| dst.copy_from_slice(&px));
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) {
        if image.is_empty() {
            return;
        }
        let (dw, dh) = (dest.width(), dest.height());
        if !(dw.is_finite() && dh.is_finite()) || dw <= 0.0 || dh <= 0.0 {
            return;
        }

        let (x0, x1) = pixel_span(dest.x0, dest.x1, self.size.width);
        let (y0, y1) = pixel_span(dest.y0, dest.y1, self.size.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let sx = f64::from(image.width) / dw;
        let sy = f64::from(image.height) / dh;
        let max_u = image.width - 1;
        let max_v = image.height - 1;
        let stride = self.size.width as usize * 4;

        // Source column per destination column is identical for every row.
        let cols: Vec<u32> = (x0..x1)
            .map(|x| {
                let u = ((f64::from(x) + 0.5 - dest.x0) * sx).floor();
                (u.max(0.0) as u32).min(max_u)
            })
            .collect();

        self.data
            .par_chunks_mut(stride)
            .enumerate()
            .skip(y0 as usize)
            .take((y1 - y0) as usize)
            .for_each(|(y, row)| {
                let v = ((y as f64 + 0.5 - dest.y0) * sy).floor();
                let v = (v.max(0.0) as u32).min(max_v);
                for (i, &u) in cols.iter().enumerate() {
                    let x = (x0 as usize + i) * 4;
                    src_over_px(&mut row[x..x + 4], image.px(u, v));
                }
            });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
