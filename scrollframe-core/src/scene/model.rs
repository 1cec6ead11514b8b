use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::spring::SpringParams,
    assets::source::{FrameSource, FrameSourceSpec},
    draw::plan::FitPolicy,
    foundation::{
        core::{FrameCount, FrameIndex, Rgba8Premul},
        error::{ScrollframeError, ScrollframeResult},
    },
    overlay::beat::{Beat, BeatStyle, visible_beats},
    player::config::{DeadlineBudget, PlayerConfig},
};

fn default_background() -> String {
    "#050505".to_string()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// JSON description of one page's scroll-scrubbed frame sequence.
///
/// ```json
/// {
///   "page": "home",
///   "frame_count": 7,
///   "frames": { "pattern": "/images/so{n}.jpg" },
///   "background": "#050505",
///   "fit": "cover",
///   "beats": [{ "id": "intro", "title": "Hello", "range": [0.0, 0.25] }]
/// }
/// ```
pub struct Scene {
    /// Page identifier; selects which sequence this scene belongs to.
    pub page: String,
    /// Number of frames in the sequence.
    pub frame_count: FrameCount,
    /// Where frame `i` lives.
    pub frames: FrameSourceSpec,
    /// Hex fill painted behind frames.
    #[serde(default = "default_background")]
    pub background: String,
    /// Scaling policy.
    #[serde(default)]
    pub fit: FitPolicy,
    /// Forced-completion budgets in milliseconds.
    #[serde(default)]
    pub deadline_ms: DeadlineBudget,
    /// Scroll smoothing.
    #[serde(default)]
    pub spring: SpringParams,
    /// Overlay beats keyed to scroll progress.
    #[serde(default)]
    pub beats: Vec<Beat>,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollframeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollframeError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(s: &str) -> ScrollframeResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollframeError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check frames, background, deadlines, spring and beat ranges.
    pub fn validate(&self) -> ScrollframeResult<()> {
        if self.page.trim().is_empty() {
            return Err(ScrollframeError::validation("scene page must be non-empty"));
        }
        self.frames.validate()?;
        self.background_color()?;
        self.spring.validate()?;
        if self.deadline_ms.compact == 0 || self.deadline_ms.wide == 0 {
            return Err(ScrollframeError::validation(
                "scene deadline_ms values must be > 0",
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for beat in &self.beats {
            beat.validate()?;
            if !seen.insert(beat.id.as_str()) {
                return Err(ScrollframeError::validation(format!(
                    "duplicate beat id '{}'",
                    beat.id
                )));
            }
        }
        Ok(())
    }

    /// Parsed background color.
    pub fn background_color(&self) -> ScrollframeResult<Rgba8Premul> {
        Rgba8Premul::from_hex(&self.background)
    }

    /// URL of frame `index`.
    pub fn frame_url(&self, index: FrameIndex) -> String {
        self.frames.frame_url(index)
    }

    /// Beats visible at `progress`, with their style.
    pub fn visible_beats(&self, progress: f64) -> Vec<(&Beat, BeatStyle)> {
        visible_beats(&self.beats, progress)
    }

    /// Validate and build the player configuration for this scene.
    pub fn player_config(&self) -> ScrollframeResult<PlayerConfig> {
        self.validate()?;
        let config = PlayerConfig::new(self.frame_count, self.frames.clone())
            .with_fit(self.fit)
            .with_background(self.background_color()?)
            .with_deadline(self.deadline_ms)
            .with_spring(self.spring);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
