//! Fire-and-forget frame preloading on tokio.
//!
//! Every frame gets its own fetch+decode task. Completions are delivered over a channel in
//! whatever order the network produces them, alongside a single deadline event. The
//! [`PreloadHandle`] owns all tasks: dropping it aborts anything still in flight.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinSet};

use crate::{
    assets::{
        decode::{PreparedImage, decode_image},
        fetch::FrameFetcher,
    },
    foundation::{
        core::FrameIndex,
        error::{ScrollframeError, ScrollframeResult},
    },
};

#[derive(Clone, Debug)]
/// Outcome delivered by the preloader.
pub enum LoadEvent {
    /// One frame finished; `image` is `None` if fetching or decoding failed.
    Frame {
        /// Slot this frame belongs to.
        index: FrameIndex,
        /// Decoded image, if the load succeeded.
        image: Option<PreparedImage>,
    },
    /// The forced-completion budget elapsed.
    Deadline,
}

/// Receiving side of a running preload.
pub struct PreloadHandle {
    rx: mpsc::UnboundedReceiver<LoadEvent>,
    tasks: JoinSet<()>,
}

impl PreloadHandle {
    /// Next event if one is already queued.
    pub fn try_next(&mut self) -> Option<LoadEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event. `None` once every task has finished and the queue is drained.
    pub async fn next(&mut self) -> Option<LoadEvent> {
        self.rx.recv().await
    }

    /// Abort all outstanding fetches and the deadline timer.
    pub fn abort(&mut self) {
        self.tasks.abort_all();
        self.rx.close();
    }
}

impl std::fmt::Debug for PreloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadHandle")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Spawn one task per `(index, url)` plus a deadline timer on the current tokio runtime.
///
/// Fails only when called outside a runtime.
#[tracing::instrument(skip(fetcher, frames), fields(frames = frames.len()))]
pub fn spawn_preload<F: FrameFetcher>(
    fetcher: Arc<F>,
    frames: Vec<(FrameIndex, String)>,
    deadline: Duration,
) -> ScrollframeResult<PreloadHandle> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| ScrollframeError::validation(format!("preload needs a tokio runtime: {e}")))?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut tasks = JoinSet::new();

    for (index, url) in frames {
        let fetcher = Arc::clone(&fetcher);
        let tx = tx.clone();
        tasks.spawn_on(
            async move {
                let image = match load_frame(fetcher.as_ref(), &url).await {
                    Ok(img) => {
                        tracing::debug!(index = index.0, %url, "frame loaded");
                        Some(img)
                    }
                    Err(err) => {
                        tracing::warn!(index = index.0, %url, %err, "frame failed to load");
                        None
                    }
                };
                let _ = tx.send(LoadEvent::Frame { index, image });
            },
            &runtime,
        );
    }

    tasks.spawn_on(
        async move {
            tokio::time::sleep(deadline).await;
            let _ = tx.send(LoadEvent::Deadline);
        },
        &runtime,
    );

    Ok(PreloadHandle { rx, tasks })
}

async fn load_frame<F: FrameFetcher>(fetcher: &F, url: &str) -> ScrollframeResult<PreparedImage> {
    let bytes = fetcher.fetch(url).await?;
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| ScrollframeError::decode(format!("decode task failed: {e}")))?
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preload.rs"]
mod tests;
