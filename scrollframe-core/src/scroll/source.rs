//! Observable inputs for the player: scroll progress and viewport size.
//!
//! Both are latest-value signals backed by `tokio::sync::watch`. A consumer only ever needs
//! the most recent value, so intermediate updates between two reads collapse into one.
//! Dropping a [`Subscription`] is the unsubscribe.

use tokio::sync::watch;

use crate::{foundation::core::Viewport, sequence::frame_map::clamp_progress};

#[derive(Debug)]
/// Receiving end of a latest-value signal.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    fn new(rx: watch::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Value published since the last call, if any.
    pub fn latest(&mut self) -> Option<T> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.rx.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Most recent value regardless of whether it was already seen.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next published value. `None` once the source is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Subscription to normalized scroll progress in `[0, 1]`.
pub type ProgressSubscription = Subscription<f64>;

/// Subscription to viewport changes.
pub type ViewportSubscription = Subscription<Viewport>;

/// Anything that publishes scroll progress in `[0, 1]`.
pub trait ProgressSource {
    /// Start observing progress.
    fn subscribe(&self) -> ProgressSubscription;
}

fn publish(tx: &watch::Sender<f64>, p: f64) {
    tx.send_if_modified(|cur| {
        if *cur == p {
            false
        } else {
            *cur = p;
            true
        }
    });
}

#[derive(Debug)]
/// Progress set directly by the owner; for tests and headless rendering.
pub struct ManualProgress {
    tx: watch::Sender<f64>,
}

impl ManualProgress {
    /// Start at `initial` (clamped).
    pub fn new(initial: f64) -> Self {
        let (tx, _) = watch::channel(clamp_progress(initial));
        Self { tx }
    }

    /// Publish a new value (clamped to `[0, 1]`).
    pub fn set(&self, progress: f64) {
        publish(&self.tx, clamp_progress(progress));
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        *self.tx.borrow()
    }
}

impl Default for ManualProgress {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ProgressSource for ManualProgress {
    fn subscribe(&self) -> ProgressSubscription {
        Subscription::new(self.tx.subscribe())
    }
}

#[derive(Debug)]
/// Scrollable region whose progress is `offset / (content_height - viewport_height)`.
pub struct ScrollRegion {
    tx: watch::Sender<f64>,
    content_height: f64,
    viewport_height: f64,
    offset: f64,
}

impl ScrollRegion {
    /// Region of `content_height` viewed through `viewport_height`, scrolled to the top.
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        let (tx, _) = watch::channel(0.0);
        let mut out = Self {
            tx,
            content_height: 0.0,
            viewport_height: 0.0,
            offset: 0.0,
        };
        out.set_layout(content_height, viewport_height);
        out
    }

    /// Maximum scroll offset; 0 when the content fits.
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Progress for the current offset and layout.
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        clamp_progress(self.offset / max)
    }

    /// Update layout (e.g. after a resize); the offset is re-clamped.
    pub fn set_layout(&mut self, content_height: f64, viewport_height: f64) {
        self.content_height = finite_or_zero(content_height);
        self.viewport_height = finite_or_zero(viewport_height);
        self.scroll_to(self.offset);
    }

    /// Scroll to an absolute offset (clamped).
    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = finite_or_zero(offset).clamp(0.0, self.max_offset());
        publish(&self.tx, self.progress());
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.offset + finite_or_zero(delta));
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

impl ProgressSource for ScrollRegion {
    fn subscribe(&self) -> ProgressSubscription {
        Subscription::new(self.tx.subscribe())
    }
}

#[derive(Debug)]
/// Publishes viewport changes (window resizes).
pub struct ViewportSignal {
    tx: watch::Sender<Viewport>,
}

impl ViewportSignal {
    /// Start with `initial`.
    pub fn new(initial: Viewport) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new viewport if it differs from the current one.
    pub fn set(&self, viewport: Viewport) {
        self.tx.send_if_modified(|cur| {
            if *cur == viewport {
                false
            } else {
                *cur = viewport;
                true
            }
        });
    }

    /// Current viewport.
    pub fn get(&self) -> Viewport {
        *self.tx.borrow()
    }

    /// Start observing viewport changes.
    pub fn subscribe(&self) -> ViewportSubscription {
        Subscription::new(self.tx.subscribe())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
