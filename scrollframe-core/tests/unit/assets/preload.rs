use std::time::Duration;

use super::*;
use crate::test_support::{MockFetcher, solid_png, urls};

async fn drain_frames(handle: &mut PreloadHandle, n: usize) -> Vec<(u32, bool)> {
    let mut out = Vec::new();
    while out.len() < n {
        match handle.next().await {
            Some(LoadEvent::Frame { index, image }) => out.push((index.0, image.is_some())),
            Some(LoadEvent::Deadline) => {}
            None => break,
        }
    }
    out
}

#[tokio::test(start_paused = true)]
async fn completions_arrive_in_network_order_not_issue_order() {
    let fetcher = Arc::new(MockFetcher::sequence(4, |i| 400 - u64::from(i) * 100));
    let mut handle = spawn_preload(fetcher, urls(4), Duration::from_secs(4)).unwrap();

    let got = drain_frames(&mut handle, 4).await;
    assert_eq!(got, vec![(3, true), (2, true), (1, true), (0, true)]);
}

#[tokio::test(start_paused = true)]
async fn failures_are_delivered_as_empty_frames() {
    let fetcher = Arc::new(
        MockFetcher::new()
            .ok("f0.png", 10, solid_png(2, 2, [1, 2, 3, 255]))
            .fail("f1.png", 20)
            .ok("f2.png", 30, b"not a png".to_vec()),
    );
    let mut handle = spawn_preload(fetcher, urls(3), Duration::from_secs(4)).unwrap();

    let mut got = drain_frames(&mut handle, 3).await;
    got.sort();
    assert_eq!(got, vec![(0, true), (1, false), (2, false)]);
}

#[tokio::test(start_paused = true)]
async fn deadline_event_fires_when_frames_hang() {
    let fetcher = Arc::new(MockFetcher::new().hang("f0.png"));
    let mut handle = spawn_preload(fetcher, urls(1), Duration::from_millis(1500)).unwrap();

    let start = tokio::time::Instant::now();
    assert!(matches!(handle.next().await, Some(LoadEvent::Deadline)));
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(1500));
    assert!(waited < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_aborts_in_flight_fetches() {
    let fetcher = Arc::new(MockFetcher::sequence(3, |_| 1000));
    let handle = spawn_preload(Arc::clone(&fetcher), urls(3), Duration::from_secs(4)).unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(handle);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(fetcher.finished_count(), 0);
}

#[test]
fn spawning_outside_a_runtime_is_an_error() {
    let fetcher = Arc::new(MockFetcher::new());
    let err = spawn_preload(fetcher, urls(1), Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, ScrollframeError::Validation(_)));
}
