//! Feature components contending for one aim output across control-loop steps.

use app::{ControlLoop, SharedArbiter};
use arbiter::{AliveFlag, ArbiterConfig, Source};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Aim {
    yaw: f32,
    pitch: f32,
}

/// Re-submits its claim every step while enabled, like a feature that keeps
/// a target locked.
struct Feature {
    source: Source,
    running: AliveFlag,
    priority: i32,
    hold_ticks: u32,
    aim: Aim,
}

impl Feature {
    fn new(priority: i32, hold_ticks: u32, yaw: f32) -> Self {
        let running = AliveFlag::new(true);
        Self {
            source: Source::new(running.clone()),
            running,
            priority,
            hold_ticks,
            aim: Aim { yaw, pitch: 0.0 },
        }
    }

    fn on_step(&self, aim: &SharedArbiter<Aim>) {
        if self.running.get() {
            aim.submit(&self.source, self.priority, self.hold_ticks, self.aim)
                .expect("positive hold");
        }
    }
}

fn setup() -> (SharedArbiter<Aim>, ControlLoop) {
    let _ = env_logger::builder().is_test(true).try_init();
    let aim = SharedArbiter::with_config(ArbiterConfig::labeled("aim"));
    let control = ControlLoop::builder()
        .target(aim.clone())
        .build()
        .expect("loop builds");
    (aim, control)
}

#[test]
fn combat_feature_overrides_while_running_then_hands_back() {
    let (aim, mut control) = setup();
    let scaffold = Feature::new(10, 1, 180.0);
    let combat = Feature::new(100, 3, 42.0);

    let mut history = Vec::new();
    for step in 0..8 {
        if step == 4 {
            combat.running.set(false);
        }
        scaffold.on_step(&aim);
        if step >= 2 {
            combat.on_step(&aim);
        }
        history.push(aim.query_cloned().map(|a| a.yaw));
        control.run_once();
    }

    assert_eq!(
        history,
        vec![
            Some(180.0),
            Some(180.0),
            Some(42.0),
            Some(42.0),
            Some(180.0),
            Some(180.0),
            Some(180.0),
            Some(180.0),
        ],
        "a stopped feature must lose control immediately despite its remaining hold"
    );
    assert!(!aim.with(|arbiter| arbiter.contains(combat.source.id())));
}

#[test]
fn held_claim_outlives_its_submitter_pause() {
    let (aim, mut control) = setup();
    let flick = Feature::new(50, 3, 90.0);
    let idle = Feature::new(-1, 1000, 0.0);

    idle.on_step(&aim);
    flick.on_step(&aim);

    let mut yaws = Vec::new();
    for _ in 0..5 {
        yaws.push(aim.query_cloned().map(|a| a.yaw));
        control.run_once();
    }

    assert_eq!(
        yaws,
        vec![Some(90.0), Some(90.0), Some(90.0), Some(0.0), Some(0.0)]
    );
    assert_eq!(control.totals().expired, 1);
}

#[test]
fn cancel_releases_control_before_the_boundary() {
    let (aim, mut control) = setup();
    let low = Feature::new(1, 20, 10.0);
    let high = Feature::new(2, 20, 20.0);

    low.on_step(&aim);
    high.on_step(&aim);
    assert_eq!(aim.query_cloned(), Some(high.aim));

    assert!(aim.cancel(high.source.id()));
    assert_eq!(aim.query_cloned(), Some(low.aim));
    assert!(!aim.cancel(high.source.id()));

    let stats = control.run_once();
    assert_eq!(stats.retained, 1);
}
