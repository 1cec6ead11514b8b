/// Callbacks a page receives from its player.
///
/// Both methods default to no-ops so callers implement only what they render.
pub trait PlayerEvents {
    /// Loading advanced to `percent` (0..=100, non-decreasing).
    fn on_progress(&mut self, _percent: u8) {}

    /// Playback is ready; fires exactly once per mount.
    fn on_loaded(&mut self) {}
}

impl PlayerEvents for () {}

impl<E: PlayerEvents + ?Sized> PlayerEvents for Box<E> {
    fn on_progress(&mut self, percent: u8) {
        (**self).on_progress(percent)
    }

    fn on_loaded(&mut self) {
        (**self).on_loaded()
    }
}

/// Adapter turning a pair of closures into [`PlayerEvents`].
pub struct FnEvents<P, L> {
    on_progress: P,
    on_loaded: L,
}

impl<P, L> FnEvents<P, L>
where
    P: FnMut(u8),
    L: FnMut(),
{
    /// Wrap `on_progress` and `on_loaded`.
    pub fn new(on_progress: P, on_loaded: L) -> Self {
        Self {
            on_progress,
            on_loaded,
        }
    }
}

impl<P, L> PlayerEvents for FnEvents<P, L>
where
    P: FnMut(u8),
    L: FnMut(),
{
    fn on_progress(&mut self, percent: u8) {
        (self.on_progress)(percent)
    }

    fn on_loaded(&mut self) {
        (self.on_loaded)()
    }
}

impl<P, L> std::fmt::Debug for FnEvents<P, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvents").finish_non_exhaustive()
    }
}
