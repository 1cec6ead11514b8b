use std::time::Duration;

use super::*;

fn run(spring: &mut Spring, ticks: usize, dt_ms: u64) -> Vec<f64> {
    (0..ticks)
        .map(|_| {
            spring.step(Duration::from_millis(dt_ms));
            spring.value()
        })
        .collect()
}

#[test]
fn default_params_are_overdamped_and_valid() {
    let p = SpringParams::default();
    p.validate().unwrap();
    assert!(p.damping_ratio() > 1.0);
}

#[test]
fn invalid_params_are_rejected() {
    let p = SpringParams {
        stiffness: 0.0,
        ..SpringParams::default()
    };
    assert!(p.validate().is_err());
    let p = SpringParams {
        damping: -1.0,
        ..SpringParams::default()
    };
    assert!(p.validate().is_err());
}

#[test]
fn settles_on_target_without_overshoot() {
    let mut s = Spring::new(SpringParams::default(), 0.0);
    s.set_target(1.0);
    let values = run(&mut s, 120, 16);
    for w in values.windows(2) {
        assert!(w[1] >= w[0]);
    }
    assert!(values.iter().all(|v| *v <= 1.0));
    assert!(s.is_at_rest());
    assert_eq!(s.value(), 1.0);
}

#[test]
fn critically_damped_and_underdamped_both_settle() {
    for damping in [2.0 * 300f64.sqrt(), 10.0] {
        let mut s = Spring::new(
            SpringParams {
                damping,
                ..SpringParams::default()
            },
            0.0,
        );
        s.set_target(0.5);
        run(&mut s, 400, 16);
        assert!(s.is_at_rest(), "damping {damping}");
        assert_eq!(s.value(), 0.5);
    }
}

#[test]
fn step_at_rest_reports_no_change() {
    let mut s = Spring::new(SpringParams::default(), 0.25);
    assert!(!s.step(Duration::from_millis(16)));
    s.jump_to(0.75);
    assert_eq!(s.value(), 0.75);
    assert!(!s.step(Duration::from_millis(16)));
}

#[test]
fn one_large_step_matches_many_small_steps() {
    let mut a = Spring::new(SpringParams::default(), 0.0);
    let mut b = a.clone();
    a.set_target(1.0);
    b.set_target(1.0);
    a.step(Duration::from_millis(40));
    for _ in 0..4 {
        b.step(Duration::from_millis(10));
    }
    assert!((a.value() - b.value()).abs() < 1e-9);
}
