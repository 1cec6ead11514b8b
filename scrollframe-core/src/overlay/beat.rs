//! Progress-windowed overlay timing.
//!
//! A beat fades and slides in over the first tenth of progress after `range[0]`, holds, then
//! fades out over the last tenth before `range[1]`. Text and layout are the caller's business;
//! this module only answers "how visible is beat X at progress P".

use crate::{
    animation::interp::interpolate,
    foundation::error::{ScrollframeError, ScrollframeResult},
    sequence::frame_map::clamp_progress,
};

/// Progress span of the fade-in and fade-out ramps.
pub const BEAT_RAMP: f64 = 0.1;

const OPACITY: [f64; 4] = [0.0, 1.0, 1.0, 0.0];
const OFFSET_Y: [f64; 4] = [60.0, 0.0, 0.0, -60.0];
const SCALE: [f64; 4] = [0.9, 1.0, 1.0, 1.1];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Horizontal placement hint for a beat.
pub enum Alignment {
    /// Flush left.
    Left,
    /// Flush right.
    Right,
    /// Centered.
    #[default]
    Center,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One overlay message tied to a window of scroll progress.
pub struct Beat {
    /// Stable identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Secondary line.
    #[serde(default)]
    pub subtitle: String,
    /// Placement hint.
    #[serde(default)]
    pub alignment: Alignment,
    /// `[start, end]` in normalized progress.
    pub range: [f64; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Visual state of a beat at a given progress.
pub struct BeatStyle {
    /// 0 (hidden) to 1 (fully shown).
    pub opacity: f64,
    /// Vertical offset in CSS pixels; positive is below the resting position.
    pub offset_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Beat {
    /// Check that `0 <= start < end <= 1`.
    pub fn validate(&self) -> ScrollframeResult<()> {
        let [start, end] = self.range;
        if !(start.is_finite() && end.is_finite()) {
            return Err(ScrollframeError::validation(format!(
                "beat '{}' range must be finite",
                self.id
            )));
        }
        if !(0.0 <= start && start < end && end <= 1.0) {
            return Err(ScrollframeError::validation(format!(
                "beat '{}' range must satisfy 0 <= start < end <= 1, got [{start}, {end}]",
                self.id
            )));
        }
        Ok(())
    }

    /// Keyframe positions: `[start, start + ramp, end - ramp, end]`.
    pub fn stops(&self) -> [f64; 4] {
        let [start, end] = self.range;
        // Short beats would invert the ramps; meet in the middle instead.
        let ramp = BEAT_RAMP.min((end - start) / 2.0).max(0.0);
        [start, start + ramp, end - ramp, end]
    }

    /// Style at `progress` (clamped to `[0, 1]`).
    pub fn style_at(&self, progress: f64) -> BeatStyle {
        let p = clamp_progress(progress);
        let stops = self.stops();
        BeatStyle {
            opacity: interpolate(&stops, &OPACITY, p),
            offset_y: interpolate(&stops, &OFFSET_Y, p),
            scale: interpolate(&stops, &SCALE, p),
        }
    }
}

/// Beats with non-zero opacity at `progress`, paired with their style, in input order.
pub fn visible_beats(beats: &[Beat], progress: f64) -> Vec<(&Beat, BeatStyle)> {
    beats
        .iter()
        .map(|b| (b, b.style_at(progress)))
        .filter(|(_, s)| s.opacity > 0.0)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/beat.rs"]
mod tests;
