use crate::player::events::PlayerEvents;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Loading state of a mounted player.
pub enum LoadState {
    /// Frames are still arriving.
    Loading {
        /// Last reported percentage.
        percent: u8,
    },
    /// Playback may draw; terminal for the mount.
    Ready,
}

impl LoadState {
    /// True once ready.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How the tracker reached [`LoadState::Ready`].
pub enum Completion {
    /// Every frame reported in (successfully or not).
    Natural,
    /// The deadline fired first.
    Forced,
}

/// Order-independent completion accounting with a once-only ready transition.
///
/// Callbacks only fire while attached and loading: after `Ready` or after
/// [`LoadTracker::detach`], every input is absorbed silently.
#[derive(Debug)]
pub struct LoadTracker<E> {
    total: u32,
    completed: u32,
    state: LoadState,
    attached: bool,
    events: E,
}

impl<E: PlayerEvents> LoadTracker<E> {
    /// Track `total` frames (must be > 0).
    pub fn new(total: u32, events: E) -> Self {
        Self {
            total: total.max(1),
            completed: 0,
            state: LoadState::Loading { percent: 0 },
            attached: true,
            events,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Frames accounted for so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Whether callbacks may still fire.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Access the callback sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Account for one finished frame (success or failure).
    ///
    /// Returns `Some` on the call that makes the tracker ready.
    pub fn record_frame(&mut self) -> Option<Completion> {
        self.completed = (self.completed + 1).min(self.total);
        if !self.attached || self.state.is_ready() {
            return None;
        }

        let percent = percent_of(self.completed, self.total);
        self.report(percent);
        if self.completed == self.total {
            self.finish();
            return Some(Completion::Natural);
        }
        None
    }

    /// Deadline fallback: report 100 and become ready with whatever has loaded.
    pub fn force_complete(&mut self) -> Option<Completion> {
        if !self.attached || self.state.is_ready() {
            return None;
        }
        self.report(100);
        self.finish();
        Some(Completion::Forced)
    }

    /// Stop all further callbacks (unmount).
    pub fn detach(&mut self) {
        self.attached = false;
    }

    fn report(&mut self, percent: u8) {
        if let LoadState::Loading { percent: last } = self.state
            && percent >= last
        {
            self.state = LoadState::Loading { percent };
            self.events.on_progress(percent);
        }
    }

    fn finish(&mut self) {
        self.state = LoadState::Ready;
        self.events.on_loaded();
    }
}

/// `min(100, round(100 * completed / total))`.
pub fn percent_of(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 100;
    }
    let p = (f64::from(completed) * 100.0 / f64::from(total)).round();
    p.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/player/load.rs"]
mod tests;
