//! Scrollframe turns scroll position into a still frame from a preloaded image sequence.
//!
//! A [`FrameSequencePlayer`] owns a drawing surface, preloads N frames concurrently, and once
//! ready redraws whenever the smoothed scroll progress selects a different frame.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `FrameSource + FrameIndex -> URL` (pure, swappable per page)
//! 2. **Preload**: `FrameFetcher + decode_image -> FrameSet` slots, in any completion order,
//!    with a viewport-dependent deadline that forces readiness
//! 3. **Map**: `ProgressSource -> Spring -> frame_index_for_progress`
//! 4. **Draw**: `plan_frame -> DrawPlan -> DrawSurface` (CPU backend: [`CpuSurface`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Nothing throws to the page**: fetch/decode failures count as completed frames and
//!   leave a background-only slot.
//! - **Single-threaded player**: preload tasks only post events; unmount aborts them.
//! - **Premultiplied RGBA8** on every surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod assets;
mod draw;
mod foundation;
mod overlay;
mod player;
mod render;
mod scene;
mod scroll;
mod sequence;

pub use animation::interp::interpolate;
pub use animation::spring::{Spring, SpringParams};
pub use assets::decode::{PreparedImage, decode_image};
#[cfg(feature = "http")]
pub use assets::fetch::HttpFetcher;
pub use assets::fetch::{FrameFetcher, FsFetcher, normalize_rel_path};
pub use assets::frame_set::FrameSet;
pub use assets::preload::{LoadEvent, PreloadHandle, spawn_preload};
pub use assets::source::{
    FrameList, FramePattern, FrameSource, FrameSourceSpec, MAX_PAD_WIDTH,
};
pub use draw::plan::{DrawOp, DrawPlan, FitPolicy, fit_rect, plan_frame};
pub use foundation::core::{
    COMPACT_VIEWPORT_MAX_CSS_WIDTH, FrameCount, FrameIndex, Point, Rect, Rgba8Premul,
    SurfaceSize, Vec2, Viewport, ViewportClass,
};
pub use foundation::error::{ScrollframeError, ScrollframeResult};
pub use overlay::beat::{Alignment, BEAT_RAMP, Beat, BeatStyle, visible_beats};
pub use player::config::{DeadlineBudget, PlayerConfig};
pub use player::events::{FnEvents, PlayerEvents};
pub use player::load::{Completion, LoadState, LoadTracker, percent_of};
pub use player::player::{FrameSequencePlayer, PlayerInputs};
pub use render::cpu::CpuSurface;
pub use render::surface::{DrawSurface, FrameRGBA, execute_plan};
pub use scene::model::Scene;
pub use scroll::source::{
    ManualProgress, ProgressSource, ProgressSubscription, ScrollRegion, Subscription,
    ViewportSignal, ViewportSubscription,
};
pub use sequence::frame_map::{
    BOUNDARY_EPSILON, clamp_progress, frame_index_for_progress, progress_for_frame,
};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
