//! The frame sequence player: scroll progress in, one still frame on a surface out.
//!
//! A player is single-threaded and driven by its owner:
//!
//! - [`FrameSequencePlayer::tick`] once per animation frame (reads inputs, steps the spring,
//!   redraws when the derived frame index changes),
//! - [`FrameSequencePlayer::pump`] or [`FrameSequencePlayer::wait_until_ready`] to absorb
//!   preload completions,
//! - [`FrameSequencePlayer::unmount`] to tear everything down.
//!
//! Preload tasks never touch player state; they only post [`LoadEvent`]s. After unmount the
//! tasks are aborted and the channel is gone, so nothing can draw or call back.

use std::{sync::Arc, time::Duration};

use crate::{
    animation::spring::Spring,
    assets::{
        fetch::FrameFetcher,
        frame_set::FrameSet,
        preload::{LoadEvent, PreloadHandle, spawn_preload},
    },
    draw::plan::plan_frame,
    foundation::{
        core::{FrameIndex, Viewport},
        error::ScrollframeResult,
    },
    player::{
        config::PlayerConfig,
        events::PlayerEvents,
        load::{Completion, LoadState, LoadTracker},
    },
    render::surface::{DrawSurface, execute_plan},
    scroll::source::{ProgressSubscription, ViewportSubscription},
    sequence::frame_map::{clamp_progress, frame_index_for_progress},
};

#[derive(Debug)]
/// Signals a player observes for its lifetime.
pub struct PlayerInputs {
    /// Normalized scroll progress.
    pub progress: ProgressSubscription,
    /// Viewport (resize) changes.
    pub viewport: ViewportSubscription,
}

/// Scroll-scrubbed still-frame player bound to one drawing surface.
pub struct FrameSequencePlayer<S, E> {
    config: PlayerConfig,
    surface: Option<S>,
    frames: FrameSet,
    tracker: LoadTracker<E>,
    preload: Option<PreloadHandle>,
    inputs: Option<PlayerInputs>,
    viewport: Viewport,
    spring: Spring,
    drawn: Option<FrameIndex>,
    draw_count: u64,
}

impl<S: DrawSurface, E: PlayerEvents> FrameSequencePlayer<S, E> {
    /// Mount: size the surface, subscribe to inputs, and start preloading every frame.
    ///
    /// Must be called from within a tokio runtime.
    #[tracing::instrument(skip_all, fields(frames = config.frame_count.get()))]
    pub fn mount<F: FrameFetcher>(
        config: PlayerConfig,
        mut surface: S,
        inputs: PlayerInputs,
        fetcher: Arc<F>,
        events: E,
    ) -> ScrollframeResult<Self> {
        config.validate()?;

        let viewport = inputs.viewport.current();
        surface.resize(viewport.surface_size());

        let frames: Vec<(FrameIndex, String)> = config
            .frame_count
            .indices()
            .map(|i| (i, config.source.frame_url(i)))
            .collect();
        let deadline = config.deadline.for_viewport(viewport);
        let preload = spawn_preload(fetcher, frames, deadline)?;

        let initial = clamp_progress(inputs.progress.current());
        tracing::info!(?deadline, class = ?viewport.class(), "player mounted");

        Ok(Self {
            frames: FrameSet::new(config.frame_count),
            tracker: LoadTracker::new(config.frame_count.get(), events),
            spring: Spring::new(config.spring, initial),
            surface: Some(surface),
            preload: Some(preload),
            inputs: Some(inputs),
            viewport,
            drawn: None,
            draw_count: 0,
            config,
        })
    }

    /// Whether the player is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.tracker.is_attached()
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.tracker.state()
    }

    /// Smoothed scroll progress driving frame selection.
    pub fn smoothed_progress(&self) -> f64 {
        self.spring.value()
    }

    /// Frame index for the current smoothed progress.
    pub fn current_index(&self) -> FrameIndex {
        frame_index_for_progress(self.spring.value(), self.config.frame_count)
    }

    /// Frame last drawn to the surface, if any.
    pub fn drawn_index(&self) -> Option<FrameIndex> {
        self.drawn
    }

    /// Number of completed redraws since mount.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Loaded frames.
    pub fn frame_set(&self) -> &FrameSet {
        &self.frames
    }

    /// Viewport the surface is currently sized for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Player configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The attached surface.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Callback sink.
    pub fn events(&self) -> &E {
        self.tracker.events()
    }

    /// Detach the surface; draws are skipped until one is attached again.
    pub fn take_surface(&mut self) -> Option<S> {
        self.drawn = None;
        self.surface.take()
    }

    /// Attach a surface, size it to the viewport and draw the current frame if ready.
    pub fn attach_surface(&mut self, mut surface: S) {
        if !self.is_mounted() {
            return;
        }
        surface.resize(self.viewport.surface_size());
        self.surface = Some(surface);
        if self.state().is_ready() {
            self.draw(self.current_index());
        }
    }

    /// Absorb every queued preload event without waiting. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(ev) = self.preload.as_mut().and_then(PreloadHandle::try_next) {
            self.apply_load_event(ev);
            applied += 1;
        }
        applied
    }

    /// Apply preload events as they arrive until ready (or unmounted).
    ///
    /// Liveness comes from the forced-completion deadline, so this always finishes.
    pub async fn wait_until_ready(&mut self) -> LoadState {
        while self.is_mounted() && !self.state().is_ready() {
            let ev = match self.preload.as_mut() {
                Some(handle) => handle.next().await,
                None => None,
            };
            match ev {
                Some(ev) => self.apply_load_event(ev),
                None => break,
            }
        }
        self.state()
    }

    /// One animation frame: absorb loads, follow inputs, step smoothing, redraw on index change.
    ///
    /// Returns true while the smoothing spring is still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.pump();

        let (viewport, target) = match self.inputs.as_mut() {
            Some(inputs) => (inputs.viewport.latest(), inputs.progress.latest()),
            None => (None, None),
        };
        if let Some(vp) = viewport {
            self.resize(vp);
        }
        if let Some(p) = target {
            self.spring.set_target(clamp_progress(p));
        }

        self.spring.step(dt);
        self.redraw_if_index_changed();
        !self.spring.is_at_rest()
    }

    /// Jump straight to `progress` without smoothing and redraw if the index changed.
    pub fn seek(&mut self, progress: f64) {
        if !self.is_mounted() {
            return;
        }
        self.spring.jump_to(clamp_progress(progress));
        self.redraw_if_index_changed();
    }

    /// Resize the surface to `viewport` in device pixels and redraw immediately.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.is_mounted() {
            return;
        }
        self.viewport = viewport;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport.surface_size());
        }
        if self.state().is_ready() {
            self.draw(self.current_index());
        }
    }

    /// Tear down: abort preloading, drop subscriptions, silence callbacks, release the surface.
    pub fn unmount(&mut self) -> Option<S> {
        if let Some(mut handle) = self.preload.take() {
            handle.abort();
        }
        self.inputs = None;
        self.tracker.detach();
        tracing::debug!(draws = self.draw_count, "player unmounted");
        self.surface.take()
    }

    fn apply_load_event(&mut self, ev: LoadEvent) {
        if !self.is_mounted() {
            return;
        }
        match ev {
            LoadEvent::Frame { index, image } => {
                let filled = match image {
                    Some(img) => self.frames.insert(index, img),
                    None => false,
                };
                let was_ready = self.state().is_ready();
                if let Some(c) = self.tracker.record_frame() {
                    self.on_ready(c);
                } else if was_ready && filled && index == self.current_index() {
                    tracing::debug!(index = index.0, "late frame arrived on screen");
                    self.draw(index);
                }
            }
            LoadEvent::Deadline => {
                if let Some(c) = self.tracker.force_complete() {
                    self.on_ready(c);
                }
            }
        }
    }

    fn on_ready(&mut self, completion: Completion) {
        tracing::info!(
            ?completion,
            loaded = self.frames.loaded_count(),
            total = self.frames.len(),
            "frames ready"
        );
        self.draw(self.current_index());
    }

    fn redraw_if_index_changed(&mut self) {
        if !self.state().is_ready() {
            return;
        }
        let idx = self.current_index();
        if self.drawn != Some(idx) {
            self.draw(idx);
        }
    }

    fn draw(&mut self, index: FrameIndex) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::trace!(index = index.0, "no surface attached, skipping draw");
            return;
        };
        let plan = plan_frame(
            index,
            &self.frames,
            surface.size(),
            self.config.fit,
            self.config.background,
        );
        match execute_plan(surface, &plan, &self.frames) {
            Ok(()) => {
                self.drawn = Some(index);
                self.draw_count += 1;
                tracing::debug!(index = index.0, "frame drawn");
            }
            Err(err) => tracing::warn!(index = index.0, %err, "draw skipped"),
        }
    }
}

impl<S, E> std::fmt::Debug for FrameSequencePlayer<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSequencePlayer")
            .field("config", &self.config)
            .field("loaded", &self.frames.loaded_count())
            .field("viewport", &self.viewport)
            .field("drawn", &self.drawn)
            .field("draw_count", &self.draw_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/player.rs"]
mod tests;
