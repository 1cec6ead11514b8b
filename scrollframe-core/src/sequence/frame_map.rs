use crate::foundation::core::{FrameCount, FrameIndex};

/// Scaled positions this close to a frame boundary snap onto it, absorbing float noise from
/// accumulated progress values.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Normalize raw progress into `[0, 1]`; non-finite input becomes 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `floor(progress * (count - 1))`, clamped to `[0, count - 1]`.
///
/// A scaled value within [`BOUNDARY_EPSILON`] of a whole number snaps onto it before flooring,
/// so progress accumulated from repeated steps (for example six additions of `1/6`) lands on
/// the frame it names instead of the one before. Values farther below a boundary floor normally.
pub fn frame_index_for_progress(progress: f64, count: FrameCount) -> FrameIndex {
    let last = count.last().0;
    if last == 0 {
        return FrameIndex(0);
    }
    let raw = clamp_progress(progress) * f64::from(last);
    let nearest = raw.round();
    let idx = if (raw - nearest).abs() < BOUNDARY_EPSILON {
        nearest
    } else {
        raw.floor()
    };
    FrameIndex((idx as u32).min(last))
}

/// Lowest progress value that selects `index` (inverse of [`frame_index_for_progress`]).
pub fn progress_for_frame(index: FrameIndex, count: FrameCount) -> f64 {
    let last = count.last().0;
    if last == 0 {
        return 0.0;
    }
    f64::from(index.0.min(last)) / f64::from(last)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/frame_map.rs"]
mod tests;
