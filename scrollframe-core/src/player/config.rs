use std::{sync::Arc, time::Duration};

use crate::{
    animation::spring::SpringParams,
    assets::source::FrameSource,
    draw::plan::FitPolicy,
    foundation::{
        core::{FrameCount, Rgba8Premul, Viewport, ViewportClass},
        error::{ScrollframeError, ScrollframeResult},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Forced-completion budgets, in milliseconds, per viewport class.
pub struct DeadlineBudget {
    /// Budget for phone-class viewports.
    pub compact: u64,
    /// Budget for wider viewports.
    pub wide: u64,
}

impl Default for DeadlineBudget {
    fn default() -> Self {
        Self {
            compact: 1500,
            wide: 4000,
        }
    }
}

impl DeadlineBudget {
    /// Budget applying to `viewport`.
    pub fn for_viewport(&self, viewport: Viewport) -> Duration {
        match viewport.class() {
            ViewportClass::Compact => Duration::from_millis(self.compact),
            ViewportClass::Wide => Duration::from_millis(self.wide),
        }
    }
}

#[derive(Clone)]
/// Everything a player needs to know about its frame sequence.
pub struct PlayerConfig {
    /// Number of frames.
    pub frame_count: FrameCount,
    /// Index-to-URL mapping.
    pub source: Arc<dyn FrameSource>,
    /// Scaling policy.
    pub fit: FitPolicy,
    /// Fill painted behind every frame.
    pub background: Rgba8Premul,
    /// Forced-completion budgets.
    pub deadline: DeadlineBudget,
    /// Scroll smoothing.
    pub spring: SpringParams,
}

impl PlayerConfig {
    /// Config with default fit, background, deadlines and spring.
    pub fn new(frame_count: FrameCount, source: impl FrameSource + 'static) -> Self {
        Self {
            frame_count,
            source: Arc::new(source),
            fit: FitPolicy::default(),
            background: Rgba8Premul::default(),
            deadline: DeadlineBudget::default(),
            spring: SpringParams::default(),
        }
    }

    /// Override the fit policy.
    pub fn with_fit(mut self, fit: FitPolicy) -> Self {
        self.fit = fit;
        self
    }

    /// Override the background.
    pub fn with_background(mut self, background: Rgba8Premul) -> Self {
        self.background = background;
        self
    }

    /// Override the forced-completion budgets.
    pub fn with_deadline(mut self, deadline: DeadlineBudget) -> Self {
        self.deadline = deadline;
        self
    }

    /// Override the smoothing spring.
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = spring;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> ScrollframeResult<()> {
        self.spring.validate()?;
        if self.deadline.compact == 0 || self.deadline.wide == 0 {
            return Err(ScrollframeError::validation(
                "forced-completion deadlines must be > 0 ms",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("frame_count", &self.frame_count)
            .field("fit", &self.fit)
            .field("background", &self.background)
            .field("deadline", &self.deadline)
            .field("spring", &self.spring)
            .finish_non_exhaustive()
    }
}
