use super::*;
use crate::test_support::EventLog as Log;

#[test]
fn percent_rounds_and_caps() {
    assert_eq!(percent_of(0, 7), 0);
    assert_eq!(percent_of(1, 7), 14);
    assert_eq!(percent_of(3, 7), 43);
    assert_eq!(percent_of(7, 7), 100);
    assert_eq!(percent_of(9, 7), 100);
}

#[test]
fn natural_completion_reports_monotonic_progress_then_loads_once() {
    let log = Log::default();
    let mut t = LoadTracker::new(7, log.clone());
    let mut completions = Vec::new();
    for _ in 0..7 {
        completions.push(t.record_frame());
    }

    assert_eq!(
        *log.progress.borrow(),
        vec![14, 29, 43, 57, 71, 86, 100]
    );
    assert_eq!(*log.loaded.borrow(), 1);
    assert_eq!(completions.iter().filter(|c| c.is_some()).count(), 1);
    assert_eq!(completions[6], Some(Completion::Natural));
    assert_eq!(t.state(), LoadState::Ready);
}

#[test]
fn deadline_forces_ready_with_100_even_when_nothing_loaded() {
    let log = Log::default();
    let mut t = LoadTracker::new(7, log.clone());
    assert_eq!(t.force_complete(), Some(Completion::Forced));

    assert_eq!(*log.progress.borrow(), vec![100]);
    assert_eq!(*log.loaded.borrow(), 1);
    assert_eq!(t.state(), LoadState::Ready);
}

#[test]
fn late_frames_and_second_deadline_are_silent_after_ready() {
    let log = Log::default();
    let mut t = LoadTracker::new(3, log.clone());
    t.record_frame();
    t.force_complete();
    assert_eq!(t.record_frame(), None);
    assert_eq!(t.record_frame(), None);
    assert_eq!(t.force_complete(), None);

    assert_eq!(*log.progress.borrow(), vec![33, 100]);
    assert_eq!(*log.loaded.borrow(), 1);
    assert_eq!(t.completed(), 3);
}

#[test]
fn detached_tracker_fires_nothing() {
    let log = Log::default();
    let mut t = LoadTracker::new(2, log.clone());
    t.record_frame();
    t.detach();
    assert_eq!(t.record_frame(), None);
    assert_eq!(t.force_complete(), None);

    assert_eq!(*log.progress.borrow(), vec![50]);
    assert_eq!(*log.loaded.borrow(), 0);
    assert!(!t.is_attached());
}

#[test]
fn single_frame_sequence_completes_on_first_frame() {
    let log = Log::default();
    let mut t = LoadTracker::new(1, log.clone());
    assert_eq!(t.record_frame(), Some(Completion::Natural));
    assert_eq!(*log.progress.borrow(), vec![100]);
    assert_eq!(*log.loaded.borrow(), 1);
}

#[test]
fn closure_events_receive_callbacks() {
    use std::{cell::RefCell, rc::Rc};

    use crate::player::events::FnEvents;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let loaded = Rc::new(RefCell::new(false));
    let (s, l) = (Rc::clone(&seen), Rc::clone(&loaded));
    let events = FnEvents::new(
        move |p| s.borrow_mut().push(p),
        move || *l.borrow_mut() = true,
    );

    let mut tracker = LoadTracker::new(2, events);
    tracker.record_frame();
    tracker.record_frame();
    assert_eq!(*seen.borrow(), vec![50, 100]);
    assert!(*loaded.borrow());
}
